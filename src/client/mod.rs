// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Relay client
//!
//! Everything a user-facing client needs: the HTTP client for the relay API,
//! the public key cache, and the service that seals outgoing messages and
//! opens incoming ones.

pub mod error;
pub mod http;
pub mod key_cache;
pub mod service;

pub use error::{ClientError, ClientResult};
pub use http::RelayClient;
pub use key_cache::KeyCache;
pub use service::{ClientService, IncomingMessage, Identity};
