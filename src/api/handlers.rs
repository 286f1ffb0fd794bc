// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wire types for the relay HTTP API
//!
//! Byte fields (`pubKey`, `msg`, `message`) are standard padded base64 strings.
//! Missing fields deserialize to empty values so the relay can report them as
//! validation errors instead of framework rejections.

use serde::{Deserialize, Serialize};

use crate::store::PendingMessage;

/// Header carrying the caller's API key on authenticated routes
pub const API_KEY_HEADER: &str = "x-api-key";

/// Serde adapter for `Vec<u8>` <-> base64 string
pub mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "pubKey", with = "base64_bytes")]
    pub pub_key: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    #[serde(rename = "apiKey", alias = "api_key")]
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyResponse {
    #[serde(rename = "pubKey", with = "base64_bytes")]
    pub pub_key: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default, with = "base64_bytes")]
    pub msg: Vec<u8>,
}

/// Plain `{message}` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedMessage {
    #[serde(alias = "From")]
    pub from: String,
    #[serde(alias = "Message", with = "base64_bytes")]
    pub message: Vec<u8>,
}

impl From<PendingMessage> for ReceivedMessage {
    fn from(pending: PendingMessage) -> Self {
        Self {
            from: pending.from,
            message: pending.ciphertext,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    #[serde(default, alias = "Messages")]
    pub messages: Vec<ReceivedMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub users: usize,
}
