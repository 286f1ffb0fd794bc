// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-End Encryption Module
//!
//! Client-side primitives for sealing messages to a recipient's public key.
//! The relay only ever stores and forwards the resulting ciphertext.
//!
//! - **Keys**: secp256k1 identity keypairs
//! - **ECDH**: Ephemeral-static key exchange with HKDF-SHA256 derivation
//! - **Encryption**: XChaCha20-Poly1305 AEAD for the message body
//! - **Sealed**: `encrypt` / `decrypt` over opaque byte sequences
//!
//! ## Security Considerations
//!
//! - A fresh ephemeral key and nonce are generated for every message
//! - Private keys are held in memory only, never sent to the relay

pub mod ecdh;
pub mod encryption;
pub mod error;
pub mod keys;
pub mod sealed;

pub use ecdh::derive_shared_key;
pub use encryption::{decrypt_with_aead, encrypt_with_aead};
pub use error::CryptoError;
pub use keys::{generate_keypair, PrivateKey, PublicKey};
pub use sealed::{decrypt, encrypt};
