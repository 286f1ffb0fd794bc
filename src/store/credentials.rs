// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! API key issuance and authentication
//!
//! Keys are 32 bytes from the OS CSPRNG, hex encoded. They never expire and
//! cannot be revoked; a key stays bound to its user for the process lifetime.

use rand::{rngs::OsRng, RngCore};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult};

const API_KEY_BYTES: usize = 32;

#[derive(Clone, Default)]
pub struct CredentialStore {
    bindings: Arc<RwLock<HashMap<String, String>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh API key bound to `username`
    pub async fn issue(&self, username: &str) -> String {
        let mut bindings = self.bindings.write().await;
        loop {
            // A 256-bit collision is not going to happen, but a bound key must never be rebound
            match bindings.entry(generate_api_key()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    let api_key = slot.key().clone();
                    slot.insert(username.to_string());
                    tracing::debug!("🔑 API key issued for user: {}", username);
                    return api_key;
                }
            }
        }
    }

    /// Resolve an API key to its username
    ///
    /// Unknown and malformed keys are indistinguishable to the caller.
    pub async fn authenticate(&self, api_key: &str) -> StoreResult<String> {
        let bindings = self.bindings.read().await;
        bindings
            .get(api_key)
            .cloned()
            .ok_or(StoreError::Unauthenticated)
    }

    pub async fn count(&self) -> usize {
        self.bindings.read().await.len()
    }
}

fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
