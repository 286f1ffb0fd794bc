// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Two clients talking through a live relay on a loopback port

use e2e_relay_node::{
    api::ApiServer,
    client::{ClientService, RelayClient},
    config::ApiConfig,
    relay::RelayService,
    store::RelayStore,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

async fn start_relay() -> ApiServer {
    let config = ApiConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        ..ApiConfig::default()
    };
    ApiServer::new(config, RelayService::in_memory())
        .await
        .expect("relay should start")
}

fn client_for(server: &ApiServer) -> RelayClient {
    RelayClient::new(&format!("http://{}", server.local_addr())).unwrap()
}

#[tokio::test]
async fn test_alice_sends_bob_reads() {
    let server = start_relay().await;

    let alice = ClientService::signup(client_for(&server), "alice")
        .await
        .unwrap();
    let bob = ClientService::signup(client_for(&server), "bob")
        .await
        .unwrap();

    alice.send("bob", "hi bob").await.unwrap();
    alice.send("bob", "second").await.unwrap();

    let received = bob.poll_once().await.unwrap();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].from, "alice");
    assert_eq!(received[0].content, Ok("hi bob".to_string()));
    assert_eq!(received[1].content, Ok("second".to_string()));

    // Mailbox was drained by the first read
    assert!(bob.poll_once().await.unwrap().is_empty());

    // Bob's key is now cached on Alice's side
    assert!(alice.key_cache().get("bob").await.is_some());

    server.shutdown().await;
}

#[tokio::test]
async fn test_relay_only_sees_ciphertext() {
    let server = start_relay().await;

    let alice = ClientService::signup(client_for(&server), "alice")
        .await
        .unwrap();
    let _bob = ClientService::signup(client_for(&server), "bob")
        .await
        .unwrap();

    alice.send("bob", "secret plans").await.unwrap();

    let relay = server.service().clone();
    let pending = relay.store().pending("bob").await;
    assert_eq!(pending, 1);

    let stored = relay.store().drain_all("bob").await;
    assert_eq!(stored.len(), 1);
    let raw = &stored[0].ciphertext;
    assert!(!raw
        .windows(b"secret plans".len())
        .any(|w| w == b"secret plans"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_receiver_delivers_until_cancelled() {
    let server = start_relay().await;

    let alice = ClientService::signup(client_for(&server), "alice")
        .await
        .unwrap();
    let bob = ClientService::signup(client_for(&server), "bob")
        .await
        .unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let cancel = CancellationToken::new();
    let receiver = {
        let bob = bob.clone();
        let seen = seen.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            bob.run_receiver(Duration::from_millis(50), cancel, move |message| {
                seen.lock().unwrap().push(message);
            })
            .await
        })
    };

    alice.send("bob", "ping").await.unwrap();

    let mut waited = Duration::ZERO;
    while seen.lock().unwrap().is_empty() && waited < Duration::from_secs(5) {
        tokio::time::sleep(Duration::from_millis(25)).await;
        waited += Duration::from_millis(25);
    }

    cancel.cancel();
    receiver.await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].from, "alice");
    assert_eq!(seen[0].content, Ok("ping".to_string()));

    server.shutdown().await;
}
