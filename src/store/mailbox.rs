// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-recipient mailboxes
//!
//! Each recipient gets its own FIFO queue behind its own mutex. The outer map
//! is only write-locked the first time a recipient receives a message, so
//! appends and drains for different recipients do not contend with each other.
//!
//! A drain moves the entire queue out under the mailbox lock. An append is
//! either fully inside that drain or lands in the next one; a message is never
//! returned twice and never lost.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Encrypted message waiting for its recipient to poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    pub from: String,
    pub ciphertext: Vec<u8>,
}

type Mailbox = Arc<Mutex<VecDeque<PendingMessage>>>;

#[derive(Clone, Default)]
pub struct MailboxStore {
    mailboxes: Arc<RwLock<HashMap<String, Mailbox>>>,
}

impl MailboxStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a message at the tail of `to`'s mailbox
    ///
    /// Creates the mailbox on first use. Does not check that `to` is a
    /// registered user; that is the caller's job.
    pub async fn append(&self, to: &str, from: &str, ciphertext: Vec<u8>) {
        let mailbox = self.mailbox_for(to).await;
        let mut queue = mailbox.lock().await;
        queue.push_back(PendingMessage {
            from: from.to_string(),
            ciphertext,
        });
        tracing::debug!("📥 Queued message {} -> {} (pending: {})", from, to, queue.len());
    }

    /// Remove and return every pending message for `username`, oldest first
    pub async fn drain_all(&self, username: &str) -> Vec<PendingMessage> {
        let mailbox = self.mailboxes.read().await.get(username).cloned();
        match mailbox {
            Some(mailbox) => {
                let mut queue = mailbox.lock().await;
                let drained: Vec<PendingMessage> = queue.drain(..).collect();
                if !drained.is_empty() {
                    tracing::debug!("📤 Drained {} message(s) for {}", drained.len(), username);
                }
                drained
            }
            None => Vec::new(),
        }
    }

    /// Number of messages waiting for `username`
    pub async fn pending(&self, username: &str) -> usize {
        let mailbox = self.mailboxes.read().await.get(username).cloned();
        match mailbox {
            Some(mailbox) => mailbox.lock().await.len(),
            None => 0,
        }
    }

    /// Whether a mailbox was ever created for `username`
    pub async fn has_mailbox(&self, username: &str) -> bool {
        self.mailboxes.read().await.contains_key(username)
    }

    async fn mailbox_for(&self, username: &str) -> Mailbox {
        if let Some(mailbox) = self.mailboxes.read().await.get(username) {
            return mailbox.clone();
        }

        let mut mailboxes = self.mailboxes.write().await;
        mailboxes
            .entry(username.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(VecDeque::new())))
            .clone()
    }
}
