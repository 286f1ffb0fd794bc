// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Interactive relay client
//!
//! Signs up once, then runs two independent activities: a prompt loop that
//! sends messages typed on stdin, and a background poller that prints
//! whatever arrives in the mailbox.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio_util::sync::CancellationToken;

use crate::client::{ClientService, IncomingMessage, RelayClient};
use crate::config::{ClientConfig, DEFAULT_SERVER_URL};

/// E2E relay client
#[derive(Parser, Debug)]
#[command(name = "relay-client")]
#[command(version)]
#[command(about = "Send and receive end-to-end encrypted messages through a relay", long_about = None)]
pub struct Cli {
    /// Relay base URL
    #[arg(long, env = "RELAY_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    /// Username to sign up as (prompted for when omitted)
    #[arg(long, env = "RELAY_USERNAME")]
    pub name: Option<String>,

    /// Seconds between mailbox polls
    #[arg(long, env = "RELAY_POLL_INTERVAL_SECS", default_value_t = 5)]
    pub poll_interval_secs: u64,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            server_url: self.server.clone(),
            poll_interval: Duration::from_secs(self.poll_interval_secs.max(1)),
        }
    }
}

/// Execute the interactive client until stdin closes
pub async fn execute(cli: Cli) -> Result<()> {
    let config = cli.client_config();
    let client = RelayClient::new(&config.server_url)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let name = match cli.name {
        Some(name) => name,
        None => prompt(&mut lines, "Enter your name: ")
            .await?
            .ok_or_else(|| anyhow!("stdin closed before a name was entered"))?,
    };

    let service = ClientService::signup(client, &name).await?;

    let cancel = CancellationToken::new();
    let receiver = {
        let service = service.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            service
                .run_receiver(config.poll_interval, cancel, print_incoming)
                .await
        })
    };

    let result = send_loop(&service, &mut lines).await;

    cancel.cancel();
    let _ = receiver.await;
    result
}

async fn send_loop(service: &ClientService, lines: &mut Lines<BufReader<Stdin>>) -> Result<()> {
    loop {
        let Some(to) = prompt(lines, "Enter name of user to send Message to: ").await? else {
            return Ok(());
        };
        let Some(message) = prompt(lines, "Enter Message: ").await? else {
            return Ok(());
        };

        if let Err(e) = service.send(&to, &message).await {
            eprintln!("❌ Failed to send message to {}: {}", to, e);
        }
    }
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?.map(|line| line.trim().to_string()))
}

fn print_incoming(message: IncomingMessage) {
    match message.content {
        Ok(text) => println!("\nFrom: {}, Message: {}", message.from, text),
        Err(e) => println!("\nFrom: {}, <could not decrypt: {}>", message.from, e),
    }
}
