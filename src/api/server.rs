// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Json, Path, State},
    http::HeaderMap,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

use super::handlers::{
    HealthResponse, MessagesResponse, PublicKeyResponse, ReceivedMessage, SendMessageRequest,
    SignupRequest, SignupResponse, StatusMessage, API_KEY_HEADER,
};
use super::ApiError;
use crate::config::ApiConfig;
use crate::relay::RelayService;

/// Relay HTTP server running in the background
pub struct ApiServer {
    config: ApiConfig,
    addr: SocketAddr,
    service: RelayService,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server_task: Option<JoinHandle<()>>,
}

impl ApiServer {
    /// Bind `config.listen_addr` and start serving `service`
    pub async fn new(config: ApiConfig, service: RelayService) -> Result<Self> {
        let addr: SocketAddr = config.listen_addr.parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        let mut server = Self {
            config,
            addr: actual_addr,
            service,
            shutdown_tx: None,
            server_task: None,
        };
        server.start_http_server(listener);

        info!("🚀 Relay API listening on {}", actual_addr);
        Ok(server)
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn service(&self) -> &RelayService {
        &self.service
    }

    fn start_http_server(&mut self, listener: tokio::net::TcpListener) {
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        self.shutdown_tx = Some(shutdown_tx);

        let app = create_router(self.service.clone(), &self.config);

        self.server_task = Some(tokio::spawn(async move {
            let serve_future = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });

            if let Err(e) = serve_future.await {
                tracing::error!("Relay API server stopped with error: {}", e);
            }
        }));
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.server_task.take() {
            let _ = task.await;
        }
        info!("🛑 Relay API on {} shut down", self.addr);
    }
}

/// Build the relay router
pub fn create_router(service: RelayService, config: &ApiConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/user", post(signup_handler))
        .route("/user/:name", get(get_user_handler))
        .route(
            "/message",
            get(get_messages_handler).post(send_message_handler),
        )
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http());

    if config.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(service)
}

fn api_key(headers: &HeaderMap) -> &str {
    headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

async fn health_handler(State(service): State<RelayService>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::version::VERSION_NUMBER.to_string(),
        users: service.user_count().await,
    })
}

async fn signup_handler(
    State(service): State<RelayService>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<SignupResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    let api_key = service.signup(&request.name, request.pub_key).await?;

    Ok(Json(SignupResponse {
        message: "registered user".to_string(),
        api_key,
    }))
}

async fn get_user_handler(
    State(service): State<RelayService>,
    Path(name): Path<String>,
) -> Result<Json<PublicKeyResponse>, ApiError> {
    let pub_key = service.get_public_key(&name).await?;
    Ok(Json(PublicKeyResponse { pub_key }))
}

async fn send_message_handler(
    State(service): State<RelayService>,
    headers: HeaderMap,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<StatusMessage>, ApiError> {
    let api_key = api_key(&headers);

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            // Bad keys get 403 even when the body is also broken
            service.authenticate(api_key).await?;
            return Err(ApiError::InvalidRequest(rejection.body_text()));
        }
    };

    service
        .send_message(api_key, &request.to, request.msg)
        .await?;

    Ok(Json(StatusMessage {
        message: "message sent".to_string(),
    }))
}

async fn get_messages_handler(
    State(service): State<RelayService>,
    headers: HeaderMap,
) -> Result<Json<MessagesResponse>, ApiError> {
    let messages = service.receive_messages(api_key(&headers)).await?;
    debug!("Delivering {} message(s)", messages.len());

    Ok(Json(MessagesResponse {
        messages: messages.into_iter().map(ReceivedMessage::from).collect(),
    }))
}
