// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod crypto;
pub mod relay;
pub mod store;
pub mod version;

pub use api::{ApiError, ApiServer};
pub use client::{ClientError, ClientService, RelayClient};
pub use config::{ApiConfig, ClientConfig};
pub use relay::{RelayError, RelayService};
pub use store::{InMemoryStore, PendingMessage, RelayStore, StoreError};
