// src/services/transport.rs
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::message::RelayRequest;

pub const RELAY_PATH: &str = "/api/relay-chat";

/// Client-side failures. None of them carry the server's error payload.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("relay answered with HTTP {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("could not decode relay reply: {0}")]
    Decode(String),
}

/// What the client reads from a successful relay reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelayReply {
    pub response: Option<String>,
}

#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<RelayReply, ClientError>;
}

/// Talks to a running relay server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRelayTransport {
    client: Client,
    endpoint: String,
}

impl HttpRelayTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), RELAY_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RelayTransport for HttpRelayTransport {
    async fn send(&self, message: &str) -> Result<RelayReply, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RelayRequest {
                message: message.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(RelayReply {
            response: body
                .get("response")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        })
    }
}
