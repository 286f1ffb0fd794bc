// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use e2e_relay_node::{api::ApiServer, config::ApiConfig, relay::RelayService};
use std::env;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting E2E Relay Node...\n");
    println!("📦 BUILD VERSION: {}", e2e_relay_node::version::VERSION);
    println!("📅 Build Date: {}", e2e_relay_node::version::BUILD_DATE);
    println!();
    tracing::info!("{}", e2e_relay_node::version::get_version_string());
    tracing::info!("Features: {}", e2e_relay_node::version::FEATURES.join(", "));

    let config = ApiConfig::from_env()?;
    tracing::info!(
        "Relay config: listen_addr={}, max_body_bytes={}, cors_permissive={}",
        config.listen_addr,
        config.max_body_bytes,
        config.cors_permissive
    );

    // All state is in memory and is lost on restart
    let server = ApiServer::new(config, RelayService::in_memory()).await?;
    println!("✅ Relay API listening on http://{}", server.local_addr());
    println!("   POST /user, GET /user/:name, GET|POST /message (X-API-Key)");
    println!("\nPress Ctrl+C to stop");

    signal::ctrl_c().await?;
    println!("\n🛑 Shutting down...");
    server.shutdown().await;

    Ok(())
}
