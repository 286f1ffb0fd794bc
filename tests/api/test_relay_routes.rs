// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route tests for the relay HTTP API
//!
//! Requests go straight into the router with `oneshot`, no socket involved.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use e2e_relay_node::{api::create_router, config::ApiConfig, relay::RelayService};
use serde_json::{json, Value};
use tower::util::ServiceExt;

fn setup_router() -> (Router, RelayService) {
    let service = RelayService::in_memory();
    let router = create_router(service.clone(), &ApiConfig::default());
    (router, service)
}

async fn call(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn json_request(method: Method, uri: &str, api_key: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("X-API-Key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, api_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("X-API-Key", key);
    }
    builder.body(Body::empty()).unwrap()
}

async fn signup(router: &Router, name: &str, pub_key: &[u8]) -> String {
    let (status, body) = call(
        router,
        json_request(
            Method::POST,
            "/user",
            None,
            json!({ "name": name, "pubKey": STANDARD.encode(pub_key) }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "signup failed: {}", body);
    body["apiKey"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_reports_user_count() {
    let (router, _) = setup_router();
    signup(&router, "alice", &[1, 2, 3]).await;

    let (status, body) = call(&router, get_request("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["users"], 1);
}

#[tokio::test]
async fn test_signup_returns_api_key() {
    let (router, service) = setup_router();

    let api_key = signup(&router, "alice", &[0x02; 33]).await;
    assert!(!api_key.is_empty());
    assert_eq!(service.authenticate(&api_key).await.unwrap(), "alice");
}

#[tokio::test]
async fn test_duplicate_signup_rejected() {
    let (router, _) = setup_router();
    signup(&router, "alice", &[1]).await;

    let (status, body) = call(
        &router,
        json_request(
            Method::POST,
            "/user",
            None,
            json!({ "name": "alice", "pubKey": STANDARD.encode([2]) }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "user already exists");

    // Original key is untouched
    let (_, body) = call(&router, get_request("/user/alice", None)).await;
    assert_eq!(body["pubKey"], STANDARD.encode([1]));
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let (router, _) = setup_router();

    let (status, body) = call(
        &router,
        json_request(Method::POST, "/user", None, json!({ "pubKey": "AQ==" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
    assert_eq!(body["details"]["field"], "name");

    let (status, body) = call(
        &router,
        json_request(Method::POST, "/user", None, json!({ "name": "bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "pubKey");
}

#[tokio::test]
async fn test_signup_malformed_json() {
    let (router, _) = setup_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/user")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = call(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "invalid_request");
}

#[tokio::test]
async fn test_get_user_unknown_is_bad_request() {
    let (router, _) = setup_router();

    let (status, body) = call(&router, get_request("/user/nobody", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "user not found");
}

#[tokio::test]
async fn test_send_and_receive_once() {
    let (router, _) = setup_router();
    let alice_key = signup(&router, "alice", &[1]).await;
    let bob_key = signup(&router, "bob", &[2]).await;

    for payload in [b"first".as_slice(), b"second".as_slice()] {
        let (status, body) = call(
            &router,
            json_request(
                Method::POST,
                "/message",
                Some(&alice_key),
                json!({ "to": "bob", "msg": STANDARD.encode(payload) }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "message sent");
    }

    let (status, body) = call(&router, get_request("/message", Some(&bob_key))).await;
    assert_eq!(status, StatusCode::OK);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["from"], "alice");
    assert_eq!(messages[0]["message"], STANDARD.encode(b"first"));
    assert_eq!(messages[1]["message"], STANDARD.encode(b"second"));

    // Drained
    let (status, body) = call(&router, get_request("/message", Some(&bob_key))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"], json!([]));
}

#[tokio::test]
async fn test_message_routes_require_api_key() {
    let (router, _) = setup_router();
    signup(&router, "bob", &[2]).await;

    let (status, _) = call(&router, get_request("/message", None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&router, get_request("/message", Some("bogus"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_type"], "forbidden");

    let (status, _) = call(
        &router,
        json_request(
            Method::POST,
            "/message",
            Some("bogus"),
            json!({ "to": "bob", "msg": "AQ==" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_bad_key_wins_over_bad_body() {
    let (router, _) = setup_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/message")
        .header("content-type", "application/json")
        .header("X-API-Key", "bogus")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = call(&router, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_send_to_unknown_recipient() {
    let (router, service) = setup_router();
    let alice_key = signup(&router, "alice", &[1]).await;

    let (status, body) = call(
        &router,
        json_request(
            Method::POST,
            "/message",
            Some(&alice_key),
            json!({ "to": "ghost", "msg": "AQ==" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "receiver user does not exist");
    assert!(!service.store().has_mailbox("ghost").await);
}

#[tokio::test]
async fn test_send_validation() {
    let (router, _) = setup_router();
    let alice_key = signup(&router, "alice", &[1]).await;
    signup(&router, "bob", &[2]).await;

    let (status, body) = call(
        &router,
        json_request(Method::POST, "/message", Some(&alice_key), json!({ "to": "bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "msg");

    let (status, body) = call(
        &router,
        json_request(Method::POST, "/message", Some(&alice_key), json!({ "msg": "AQ==" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "to");
}

#[tokio::test]
async fn test_self_send() {
    let (router, _) = setup_router();
    let alice_key = signup(&router, "alice", &[1]).await;

    let (status, _) = call(
        &router,
        json_request(
            Method::POST,
            "/message",
            Some(&alice_key),
            json!({ "to": "alice", "msg": "AQ==" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&router, get_request("/message", Some(&alice_key))).await;
    assert_eq!(body["messages"][0]["from"], "alice");
}
