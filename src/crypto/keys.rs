// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! secp256k1 identity keys
//!
//! Public keys travel over the wire as 33-byte compressed SEC1 points.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use std::fmt;

use super::CryptoError;

/// A user's long-term private key; never leaves the client
#[derive(Clone)]
pub struct PrivateKey(k256::SecretKey);

/// A user's public key as registered in the directory
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(k256::PublicKey);

/// Generate a fresh identity keypair
pub fn generate_keypair() -> (PrivateKey, PublicKey) {
    let secret = k256::SecretKey::random(&mut OsRng);
    let public = secret.public_key();
    (PrivateKey(secret), PublicKey(public))
}

impl PrivateKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let secret = k256::SecretKey::from_slice(bytes).map_err(|e| CryptoError::InvalidKey {
            key_type: "private_key".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(secret))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&self.0.to_bytes());
        bytes
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.public_key())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

impl PublicKey {
    /// Parse a SEC1 encoded point (compressed or uncompressed)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self(k256::PublicKey::from_sec1_bytes(bytes)?))
    }

    /// Compressed SEC1 encoding (33 bytes)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.to_bytes()))
    }
}
