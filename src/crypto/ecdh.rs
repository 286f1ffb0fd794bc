// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDH Key Exchange Implementation
//!
//! Elliptic Curve Diffie-Hellman over secp256k1. The sender combines a fresh
//! ephemeral private key with the recipient's static public key; the
//! recipient combines its static private key with the ephemeral public key
//! carried in the message. Both sides arrive at the same 32-byte key.

use hkdf::Hkdf;
use k256::{PublicKey, SecretKey};
use sha2::Sha256;

use super::CryptoError;

/// HKDF info parameter for relay message encryption domain separation
pub const MESSAGE_HKDF_INFO: &[u8] = b"e2e-relay-message-v1";

/// Derive a shared encryption key using ECDH
///
/// # Arguments
///
/// * `peer_pub` - Peer's public key (33 bytes compressed or 65 bytes uncompressed)
/// * `own_priv` - Own private key (32 bytes)
///
/// # Returns
///
/// A 32-byte encryption key suitable for XChaCha20-Poly1305
pub fn derive_shared_key(peer_pub: &[u8], own_priv: &[u8]) -> Result<[u8; 32], CryptoError> {
    if own_priv.len() != 32 {
        return Err(CryptoError::InvalidKey {
            key_type: "private_key".to_string(),
            reason: format!("expected 32 bytes, got {}", own_priv.len()),
        });
    }

    let own_secret = SecretKey::from_slice(own_priv).map_err(|e| CryptoError::InvalidKey {
        key_type: "private_key".to_string(),
        reason: e.to_string(),
    })?;

    if peer_pub.len() != 33 && peer_pub.len() != 65 {
        return Err(CryptoError::InvalidKey {
            key_type: "public_key".to_string(),
            reason: format!("expected 33 or 65 bytes, got {}", peer_pub.len()),
        });
    }

    let peer_public = PublicKey::from_sec1_bytes(peer_pub).map_err(|e| CryptoError::InvalidKey {
        key_type: "public_key".to_string(),
        reason: format!("not a valid curve point: {}", e),
    })?;

    let shared_secret =
        k256::ecdh::diffie_hellman(own_secret.to_nonzero_scalar(), peer_public.as_affine());

    let hkdf = Hkdf::<Sha256>::new(None, shared_secret.raw_secret_bytes());
    let mut derived_key = [0u8; 32];
    hkdf.expand(MESSAGE_HKDF_INFO, &mut derived_key)
        .map_err(|e| CryptoError::KeyDerivationFailed {
            operation: "hkdf_expand".to_string(),
            reason: e.to_string(),
        })?;

    Ok(derived_key)
}
