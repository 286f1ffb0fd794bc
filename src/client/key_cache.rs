// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client-side public key cache
//!
//! Consulted before asking the relay for a key so that repeated messages to
//! the same user cost no extra round trip. Directory keys never change, so
//! entries are never invalidated.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::crypto::PublicKey;

#[derive(Clone, Default)]
pub struct KeyCache {
    keys: Arc<RwLock<HashMap<String, PublicKey>>>,
}

impl KeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, username: &str) -> Option<PublicKey> {
        self.keys.read().await.get(username).cloned()
    }

    pub async fn insert(&self, username: &str, key: PublicKey) {
        self.keys.write().await.insert(username.to_string(), key);
    }

    pub async fn len(&self) -> usize {
        self.keys.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keys.read().await.is_empty()
    }
}
