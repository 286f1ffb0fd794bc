// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::relay::RelayError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InvalidRequest(String),
    ValidationError { field: String, message: String },
    AlreadyExists(String),
    UserNotFound(String),
    RecipientNotFound(String),
    Forbidden,
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let (error_type, message, details) = match self {
            ApiError::InvalidRequest(msg) => ("invalid_request", msg.clone(), None),
            ApiError::ValidationError { field, message } => {
                let mut details = HashMap::new();
                details.insert(
                    "field".to_string(),
                    serde_json::Value::String(field.clone()),
                );
                ("validation_error", message.clone(), Some(details))
            }
            ApiError::AlreadyExists(_) => {
                ("already_exists", "user already exists".to_string(), None)
            }
            ApiError::UserNotFound(_) => ("not_found", "user not found".to_string(), None),
            ApiError::RecipientNotFound(_) => (
                "recipient_not_found",
                "receiver user does not exist".to_string(),
                None,
            ),
            ApiError::Forbidden => ("forbidden", "invalid api key".to_string(), None),
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        }
    }

    /// Status codes follow the relay's wire contract: lookups of unknown
    /// users are client errors (400), not 404s.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_)
            | ApiError::ValidationError { .. }
            | ApiError::AlreadyExists(_)
            | ApiError::UserNotFound(_)
            | ApiError::RecipientNotFound(_) => 400,
            ApiError::Forbidden => 403,
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Validation { field, message } => {
                ApiError::ValidationError { field, message }
            }
            RelayError::AlreadyExists(name) => ApiError::AlreadyExists(name),
            RelayError::NotFound(name) => ApiError::UserNotFound(name),
            RelayError::RecipientNotFound(name) => ApiError::RecipientNotFound(name),
            RelayError::Forbidden => ApiError::Forbidden,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::ValidationError { field, message } => {
                write!(f, "Validation error for {}: {}", field, message)
            }
            ApiError::AlreadyExists(name) => write!(f, "User '{}' already exists", name),
            ApiError::UserNotFound(name) => write!(f, "User '{}' not found", name),
            ApiError::RecipientNotFound(name) => {
                write!(f, "Receiver user '{}' does not exist", name)
            }
            ApiError::Forbidden => write!(f, "Forbidden: invalid api key"),
        }
    }
}

impl std::error::Error for ApiError {}
