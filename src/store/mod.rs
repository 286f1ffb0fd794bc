// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Relay Storage
//!
//! In-memory state owned by the relay:
//!
//! - **Directory**: username -> public key bytes (register-if-absent, lookup)
//! - **Credentials**: API key -> username (issue, authenticate)
//! - **Mailboxes**: recipient -> FIFO of pending encrypted messages (append, drain)
//!
//! Every store guards its own map with a reader/writer lock. Nothing outside
//! this module touches the maps directly; callers go through [`RelayStore`].
//!
//! State lives in process memory only and is lost on restart.

pub mod credentials;
pub mod directory;
pub mod mailbox;
pub mod memory;

use async_trait::async_trait;

pub use credentials::CredentialStore;
pub use directory::Directory;
pub use mailbox::{MailboxStore, PendingMessage};
pub use memory::InMemoryStore;

/// Failures surfaced by the store layer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("user '{0}' already exists")]
    AlreadyExists(String),

    #[error("user '{0}' not found")]
    NotFound(String),

    #[error("unknown api key")]
    Unauthenticated,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Storage capability used by the relay service
///
/// The in-memory backend is the only implementation; a persistent backend
/// would slot in here without touching the service or HTTP layers.
#[async_trait]
pub trait RelayStore: Send + Sync {
    /// Bind a public key to a username, failing if the name is taken
    async fn register(&self, username: &str, pub_key: Vec<u8>) -> StoreResult<()>;

    /// Look up the public key registered for a username
    async fn lookup(&self, username: &str) -> StoreResult<Vec<u8>>;

    /// Issue a fresh API key bound to `username`
    async fn issue(&self, username: &str) -> String;

    /// Resolve an API key to the username it was issued for
    async fn authenticate(&self, api_key: &str) -> StoreResult<String>;

    /// Queue a message for `to`
    async fn append(&self, to: &str, from: &str, ciphertext: Vec<u8>);

    /// Take every pending message for `username`, oldest first
    async fn drain_all(&self, username: &str) -> Vec<PendingMessage>;

    /// Number of registered users
    async fn user_count(&self) -> usize;
}
