// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::crypto::CryptoError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The relay answered with a non-success status
    #[error("relay returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("invalid relay url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status returned by the relay, if the failure came from it
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
