// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod handlers;
pub mod server;

pub use errors::{ApiError, ErrorResponse};
pub use handlers::{
    HealthResponse, MessagesResponse, PublicKeyResponse, ReceivedMessage, SendMessageRequest,
    SignupRequest, SignupResponse, StatusMessage, API_KEY_HEADER,
};
pub use server::{create_router, ApiServer};
