// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! XChaCha20-Poly1305 Encryption/Decryption
//!
//! Authenticated encryption used for the body of every sealed message.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};

use super::CryptoError;

pub const NONCE_SIZE: usize = 24;
pub const KEY_SIZE: usize = 32;
pub const TAG_SIZE: usize = 16;

/// Encrypt data using XChaCha20-Poly1305 AEAD
///
/// Returns the ciphertext with the 16-byte authentication tag appended.
///
/// # Security
///
/// **CRITICAL**: Never reuse the same nonce with the same key!
pub fn encrypt_with_aead(
    plaintext: &[u8],
    nonce: &[u8],
    key: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher_for(nonce, key)?;
    cipher
        .encrypt(XNonce::from_slice(nonce), plaintext)
        .map_err(|e| CryptoError::DecryptionFailed {
            operation: "encrypt".to_string(),
            reason: e.to_string(),
        })
}

/// Decrypt data using XChaCha20-Poly1305 AEAD
///
/// Fails if the authentication tag does not verify (tampered data or wrong key).
pub fn decrypt_with_aead(
    ciphertext: &[u8],
    nonce: &[u8],
    key: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher_for(nonce, key)?;
    cipher
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed {
            operation: "decrypt".to_string(),
            reason: "authentication tag verification failed".to_string(),
        })
}

fn cipher_for(nonce: &[u8], key: &[u8]) -> Result<XChaCha20Poly1305, CryptoError> {
    if nonce.len() != NONCE_SIZE {
        return Err(CryptoError::InvalidPayload {
            field: "nonce".to_string(),
            reason: format!("expected {} bytes, got {}", NONCE_SIZE, nonce.len()),
        });
    }
    if key.len() != KEY_SIZE {
        return Err(CryptoError::InvalidKey {
            key_type: "symmetric_key".to_string(),
            reason: format!("expected {} bytes, got {}", KEY_SIZE, key.len()),
        });
    }

    XChaCha20Poly1305::new_from_slice(key).map_err(|e| CryptoError::InvalidKey {
        key_type: "symmetric_key".to_string(),
        reason: e.to_string(),
    })
}
