// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Relay error taxonomy
//!
//! Every variant is terminal: none of them describe a transient failure, so
//! callers must change the request rather than retry it.

/// Caller-visible failure of a relay operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// A required field is missing or empty
    #[error("{message}")]
    Validation { field: String, message: String },

    /// Signup collided with an existing username
    #[error("user already exists")]
    AlreadyExists(String),

    /// Public key lookup for an unknown username
    #[error("user not found")]
    NotFound(String),

    /// Message addressed to a username that was never registered
    #[error("receiver user does not exist")]
    RecipientNotFound(String),

    /// Missing, malformed or unknown API key
    #[error("invalid api key")]
    Forbidden,
}

impl RelayError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        RelayError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::validation(field, format!("field '{}' is required", field))
    }
}

pub type RelayResult<T> = std::result::Result<T, RelayError>;
