// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Public key directory
//!
//! Keys are immutable once registered: there is no update or delete.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult};

/// Username -> public key registry
///
/// # Example
///
/// ```ignore
/// let directory = Directory::new();
/// directory.register("alice", pub_key).await?;
/// let key = directory.lookup("alice").await?;
/// ```
#[derive(Clone, Default)]
pub struct Directory {
    keys: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pub_key` for `username`
    ///
    /// The existence check and insert happen under one write lock, so of any
    /// number of concurrent registrations for the same name exactly one wins.
    pub async fn register(&self, username: &str, pub_key: Vec<u8>) -> StoreResult<()> {
        let mut keys = self.keys.write().await;
        match keys.entry(username.to_string()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(username.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(pub_key);
                tracing::info!("👤 Registered user: {} (total users: {})", username, keys.len());
                Ok(())
            }
        }
    }

    pub async fn lookup(&self, username: &str) -> StoreResult<Vec<u8>> {
        let keys = self.keys.read().await;
        keys.get(username)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(username.to_string()))
    }

    pub async fn contains(&self, username: &str) -> bool {
        self.keys.read().await.contains_key(username)
    }

    pub async fn len(&self) -> usize {
        self.keys.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keys.read().await.is_empty()
    }
}
