// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sealed messages
//!
//! Public-key encryption for relay payloads: a fresh ephemeral keypair per
//! message, ECDH with the recipient key, HKDF-SHA256, XChaCha20-Poly1305.
//!
//! ## Format
//! ```text
//! ephemeral_public_key (33, compressed) || nonce (24) || ciphertext || tag (16)
//! ```

use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::{rngs::OsRng, RngCore};

use super::ecdh::derive_shared_key;
use super::encryption::{decrypt_with_aead, encrypt_with_aead, NONCE_SIZE, TAG_SIZE};
use super::{CryptoError, PrivateKey, PublicKey};

const EPHEMERAL_KEY_SIZE: usize = 33;

/// Minimum size of a sealed message (empty plaintext)
pub const SEALED_OVERHEAD: usize = EPHEMERAL_KEY_SIZE + NONCE_SIZE + TAG_SIZE;

/// Encrypt `plaintext` so only the holder of `recipient`'s private key can read it
pub fn encrypt(plaintext: &[u8], recipient: &PublicKey) -> Result<Vec<u8>, CryptoError> {
    let ephemeral = k256::SecretKey::random(&mut OsRng);
    let ephemeral_public = ephemeral.public_key().to_encoded_point(true);

    let key = derive_shared_key(&recipient.to_bytes(), &ephemeral.to_bytes())?;

    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = encrypt_with_aead(plaintext, &nonce, &key)?;

    let mut sealed = Vec::with_capacity(SEALED_OVERHEAD + plaintext.len());
    sealed.extend_from_slice(ephemeral_public.as_bytes());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Decrypt a message produced by [`encrypt`]
pub fn decrypt(sealed: &[u8], private_key: &PrivateKey) -> Result<Vec<u8>, CryptoError> {
    if sealed.len() < SEALED_OVERHEAD {
        return Err(CryptoError::InvalidPayload {
            field: "sealed_message".to_string(),
            reason: format!(
                "expected at least {} bytes, got {}",
                SEALED_OVERHEAD,
                sealed.len()
            ),
        });
    }

    let (ephemeral_public, rest) = sealed.split_at(EPHEMERAL_KEY_SIZE);
    let (nonce, ciphertext) = rest.split_at(NONCE_SIZE);

    let key = derive_shared_key(ephemeral_public, &private_key.to_bytes()).map_err(|e| {
        match e {
            CryptoError::InvalidKey { reason, .. } => CryptoError::InvalidPayload {
                field: "ephemeral_public_key".to_string(),
                reason,
            },
            other => other,
        }
    })?;

    decrypt_with_aead(ciphertext, nonce, &key)
}
