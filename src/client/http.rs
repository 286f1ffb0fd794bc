// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP client for the relay API

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use super::{ClientError, ClientResult};
use crate::api::{
    ErrorResponse, MessagesResponse, PublicKeyResponse, ReceivedMessage, SendMessageRequest,
    SignupRequest, SignupResponse, StatusMessage,
};

/// Header name as sent by clients; the server matches it case-insensitively
const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RelayClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Register `name` with its public key; returns the issued API key
    pub async fn signup(&self, name: &str, pub_key: &[u8]) -> ClientResult<String> {
        let request = SignupRequest {
            name: name.to_string(),
            pub_key: pub_key.to_vec(),
        };
        let resp = self
            .http
            .post(self.endpoint(&["user"]))
            .json(&request)
            .send()
            .await?;

        let body: SignupResponse = parse_response(resp).await?;
        Ok(body.api_key)
    }

    pub async fn get_public_key(&self, name: &str) -> ClientResult<Vec<u8>> {
        let resp = self.http.get(self.endpoint(&["user", name])).send().await?;
        let body: PublicKeyResponse = parse_response(resp).await?;
        Ok(body.pub_key)
    }

    pub async fn send_message(&self, api_key: &str, to: &str, ciphertext: Vec<u8>) -> ClientResult<()> {
        let request = SendMessageRequest {
            to: to.to_string(),
            msg: ciphertext,
        };
        let resp = self
            .http
            .post(self.endpoint(&["message"]))
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await?;

        let _: StatusMessage = parse_response(resp).await?;
        Ok(())
    }

    /// Drain the caller's mailbox on the relay
    pub async fn receive_messages(&self, api_key: &str) -> ClientResult<Vec<ReceivedMessage>> {
        let resp = self
            .http
            .get(self.endpoint(&["message"]))
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        let body: MessagesResponse = parse_response(resp).await?;
        Ok(body.messages)
    }

    /// Base URL plus percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base URLs are rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

async fn parse_response<T: DeserializeOwned>(resp: Response) -> ClientResult<T> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let message = match resp.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
