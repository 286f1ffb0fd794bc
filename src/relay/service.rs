// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{RelayError, RelayResult};
use crate::store::{InMemoryStore, PendingMessage, RelayStore, StoreError};

/// Request contracts of the relay, backed by a [`RelayStore`]
pub struct RelayService<S: RelayStore = InMemoryStore> {
    store: Arc<S>,
}

impl<S: RelayStore> Clone for RelayService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl RelayService<InMemoryStore> {
    pub fn in_memory() -> Self {
        Self::new(InMemoryStore::new())
    }
}

impl<S: RelayStore> RelayService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a user and issue its API key
    ///
    /// No credential is issued when registration fails.
    pub async fn signup(&self, name: &str, pub_key: Vec<u8>) -> RelayResult<String> {
        if name.is_empty() {
            return Err(RelayError::required("name"));
        }
        if pub_key.is_empty() {
            return Err(RelayError::required("pubKey"));
        }

        self.store
            .register(name, pub_key)
            .await
            .map_err(|e| match e {
                StoreError::AlreadyExists(name) => {
                    warn!("Signup rejected, user already exists: {}", name);
                    RelayError::AlreadyExists(name)
                }
                other => RelayError::validation("name", other.to_string()),
            })?;

        let api_key = self.store.issue(name).await;
        info!("✅ Signed up user: {}", name);
        Ok(api_key)
    }

    /// Public key lookup; deliberately unauthenticated
    pub async fn get_public_key(&self, name: &str) -> RelayResult<Vec<u8>> {
        self.store
            .lookup(name)
            .await
            .map_err(|_| RelayError::NotFound(name.to_string()))
    }

    /// Resolve the caller behind an API key
    pub async fn authenticate(&self, api_key: &str) -> RelayResult<String> {
        if api_key.is_empty() {
            return Err(RelayError::Forbidden);
        }
        self.store
            .authenticate(api_key)
            .await
            .map_err(|_| RelayError::Forbidden)
    }

    /// Queue `ciphertext` for `to` on behalf of the caller
    ///
    /// Checks run in order: auth, fields, recipient registered, append.
    pub async fn send_message(
        &self,
        api_key: &str,
        to: &str,
        ciphertext: Vec<u8>,
    ) -> RelayResult<()> {
        let from = self.authenticate(api_key).await?;

        if to.is_empty() {
            return Err(RelayError::required("to"));
        }
        if ciphertext.is_empty() {
            return Err(RelayError::required("msg"));
        }

        if self.store.lookup(to).await.is_err() {
            debug!("Send from {} rejected, unknown recipient {}", from, to);
            return Err(RelayError::RecipientNotFound(to.to_string()));
        }

        self.store.append(to, &from, ciphertext).await;
        Ok(())
    }

    /// Drain the caller's mailbox; an empty mailbox is not an error
    pub async fn receive_messages(&self, api_key: &str) -> RelayResult<Vec<PendingMessage>> {
        let username = self.authenticate(api_key).await?;
        Ok(self.store.drain_all(&username).await)
    }

    pub async fn user_count(&self) -> usize {
        self.store.user_count().await
    }
}
