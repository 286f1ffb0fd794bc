// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{ClientResult, KeyCache, RelayClient};
use crate::crypto::{self, CryptoError, PrivateKey, PublicKey};

/// Who this client is on the relay; read-only after signup
pub struct Identity {
    pub username: String,
    pub api_key: String,
    private_key: PrivateKey,
}

impl Identity {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>, private_key: PrivateKey) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            private_key,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.private_key.public_key()
    }
}

/// A message pulled from the mailbox, after local decryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub from: String,
    /// Decrypted text, or why it could not be decrypted
    pub content: Result<String, CryptoError>,
}

/// Messaging client: encrypts before sending, decrypts after receiving
///
/// Cloning is cheap; clones share the identity and the key cache, which lets
/// the send path and the receive poller run as independent tasks.
#[derive(Clone)]
pub struct ClientService {
    client: RelayClient,
    identity: Arc<Identity>,
    key_cache: KeyCache,
}

impl ClientService {
    /// Generate a keypair, register it under `username`, and seed the cache with it
    pub async fn signup(client: RelayClient, username: &str) -> ClientResult<Self> {
        let (private_key, public_key) = crypto::generate_keypair();
        let api_key = client.signup(username, &public_key.to_bytes()).await?;
        info!("✅ Signed up as {}", username);

        Ok(Self::with_identity(
            client,
            Identity::new(username, api_key, private_key),
        )
        .await)
    }

    /// Wrap an existing identity
    pub async fn with_identity(client: RelayClient, identity: Identity) -> Self {
        let key_cache = KeyCache::new();
        key_cache
            .insert(&identity.username, identity.public_key())
            .await;

        Self {
            client,
            identity: Arc::new(identity),
            key_cache,
        }
    }

    pub fn username(&self) -> &str {
        &self.identity.username
    }

    pub fn api_key(&self) -> &str {
        &self.identity.api_key
    }

    pub fn key_cache(&self) -> &KeyCache {
        &self.key_cache
    }

    /// Public key for `username`, from the cache or else the relay directory
    pub async fn resolve_public_key(&self, username: &str) -> ClientResult<PublicKey> {
        if let Some(key) = self.key_cache.get(username).await {
            return Ok(key);
        }

        let bytes = self.client.get_public_key(username).await?;
        let key = PublicKey::from_bytes(&bytes)?;
        self.key_cache.insert(username, key.clone()).await;
        debug!("Cached public key for {}", username);
        Ok(key)
    }

    /// Encrypt `plaintext` for `to` and hand it to the relay
    pub async fn send(&self, to: &str, plaintext: &str) -> ClientResult<()> {
        let recipient = self.resolve_public_key(to).await?;
        let ciphertext = crypto::encrypt(plaintext.as_bytes(), &recipient)?;
        self.client
            .send_message(&self.identity.api_key, to, ciphertext)
            .await
    }

    /// Drain the mailbox once and decrypt everything in it
    pub async fn poll_once(&self) -> ClientResult<Vec<IncomingMessage>> {
        let received = self
            .client
            .receive_messages(&self.identity.api_key)
            .await?;

        let messages = received
            .into_iter()
            .map(|message| {
                let content = crypto::decrypt(&message.message, &self.identity.private_key)
                    .map(|plaintext| String::from_utf8_lossy(&plaintext).into_owned());
                if let Err(e) = &content {
                    warn!("Could not decrypt message from {}: {}", message.from, e);
                }
                IncomingMessage {
                    from: message.from,
                    content,
                }
            })
            .collect();

        Ok(messages)
    }

    /// Poll the mailbox every `interval` until `cancel` fires
    ///
    /// Poll failures are logged and the loop keeps going.
    pub async fn run_receiver<F>(&self, interval: Duration, cancel: CancellationToken, mut on_message: F)
    where
        F: FnMut(IncomingMessage) + Send,
    {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }

            match self.poll_once().await {
                Ok(messages) => messages.into_iter().for_each(&mut on_message),
                Err(e) => warn!("Mailbox poll failed: {}", e),
            }
        }
        debug!("Receiver for {} stopped", self.identity.username);
    }
}
