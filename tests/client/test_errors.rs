// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use e2e_relay_node::{
    api::ApiServer,
    client::{ClientError, ClientService, RelayClient},
    config::ApiConfig,
    crypto::generate_keypair,
    relay::RelayService,
};

async fn start_relay() -> (ApiServer, RelayClient) {
    let config = ApiConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        ..ApiConfig::default()
    };
    let server = ApiServer::new(config, RelayService::in_memory())
        .await
        .expect("relay should start");
    let client = RelayClient::new(&format!("http://{}", server.local_addr())).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_duplicate_signup_surfaces_relay_message() {
    let (server, client) = start_relay().await;
    let (_, public_key) = generate_keypair();

    client.signup("alice", &public_key.to_bytes()).await.unwrap();
    let err = client
        .signup("alice", &public_key.to_bytes())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(matches!(err, ClientError::Api { ref message, .. } if message == "user already exists"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_bad_api_key_is_forbidden() {
    let (server, client) = start_relay().await;

    let err = client.receive_messages("not-a-key").await.unwrap_err();
    assert_eq!(err.status(), Some(403));

    let err = client
        .send_message("not-a-key", "anyone", vec![1, 2, 3])
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));

    server.shutdown().await;
}

#[tokio::test]
async fn test_send_to_unknown_user_fails_key_lookup() {
    let (server, client) = start_relay().await;
    let alice = ClientService::signup(client.clone(), "alice").await.unwrap();

    let err = alice.send("ghost", "hello?").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(alice.key_cache().get("ghost").await.is_none());

    // The relay itself also refuses unknown recipients
    let err = client
        .send_message(alice.api_key(), "ghost", vec![9; 80])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, ref message } if message == "receiver user does not exist"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_unreachable_relay_is_http_error() {
    let client = RelayClient::new("http://127.0.0.1:9").unwrap();
    let err = client.get_public_key("alice").await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert_eq!(err.status(), None);
}
