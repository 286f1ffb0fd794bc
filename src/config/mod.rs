// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process configuration
//!
//! Values come from environment variables (a `.env` file is loaded first by
//! the binaries) with defaults matching the reference deployment.

use anyhow::{anyhow, Result};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8888";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8888";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Relay HTTP server settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub listen_addr: String,
    pub max_body_bytes: usize,
    pub cors_permissive: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            cors_permissive: true,
        }
    }
}

impl ApiConfig {
    /// Read `RELAY_LISTEN_ADDR`, `RELAY_MAX_BODY_BYTES` and `RELAY_CORS_PERMISSIVE`
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("RELAY_LISTEN_ADDR").unwrap_or(defaults.listen_addr);
        listen_addr
            .parse::<SocketAddr>()
            .map_err(|e| anyhow!("Invalid RELAY_LISTEN_ADDR '{}': {}", listen_addr, e))?;

        let max_body_bytes = match env::var("RELAY_MAX_BODY_BYTES") {
            Ok(value) => value
                .parse::<usize>()
                .map_err(|e| anyhow!("Invalid RELAY_MAX_BODY_BYTES '{}': {}", value, e))?,
            Err(_) => defaults.max_body_bytes,
        };

        let cors_permissive = env::var("RELAY_CORS_PERMISSIVE")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.cors_permissive);

        Ok(Self {
            listen_addr,
            max_body_bytes,
            cors_permissive,
        })
    }
}

/// Client-side settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    /// Fixed delay between mailbox polls
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
