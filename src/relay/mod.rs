// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Relay Service
//!
//! Store-and-forward core of the relay: signup, public key lookup,
//! authenticated send and authenticated drain. Payloads are opaque
//! ciphertext; the relay never encrypts or decrypts anything.

pub mod error;
pub mod service;

pub use error::{RelayError, RelayResult};
pub use service::RelayService;
