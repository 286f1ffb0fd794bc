// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the E2E Relay Node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-mailbox-relay-2026-10-19";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2026-10-19";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "key-directory",
    "api-key-auth",
    "per-recipient-mailboxes",
    "drain-on-poll",
    "end-to-end-encryption",
    "ecdh-key-exchange",
    "xchacha20-poly1305",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("E2E Relay Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
