// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use async_trait::async_trait;

use super::{
    CredentialStore, Directory, MailboxStore, PendingMessage, RelayStore, StoreResult,
};

/// In-memory [`RelayStore`] composed of the three independent stores
#[derive(Clone, Default)]
pub struct InMemoryStore {
    directory: Directory,
    credentials: CredentialStore,
    mailboxes: MailboxStore,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending message count for `username`, without draining
    pub async fn pending(&self, username: &str) -> usize {
        self.mailboxes.pending(username).await
    }

    pub async fn has_mailbox(&self, username: &str) -> bool {
        self.mailboxes.has_mailbox(username).await
    }
}

#[async_trait]
impl RelayStore for InMemoryStore {
    async fn register(&self, username: &str, pub_key: Vec<u8>) -> StoreResult<()> {
        self.directory.register(username, pub_key).await
    }

    async fn lookup(&self, username: &str) -> StoreResult<Vec<u8>> {
        self.directory.lookup(username).await
    }

    async fn issue(&self, username: &str) -> String {
        self.credentials.issue(username).await
    }

    async fn authenticate(&self, api_key: &str) -> StoreResult<String> {
        self.credentials.authenticate(api_key).await
    }

    async fn append(&self, to: &str, from: &str, ciphertext: Vec<u8>) {
        self.mailboxes.append(to, from, ciphertext).await
    }

    async fn drain_all(&self, username: &str) -> Vec<PendingMessage> {
        self.mailboxes.drain_all(username).await
    }

    async fn user_count(&self) -> usize {
        self.directory.len().await
    }
}
