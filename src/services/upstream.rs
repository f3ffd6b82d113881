// src/services/upstream.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::ApiKey;

pub const SECRET_KEY_HEADER: &str = "x-secret-key";
pub const NO_REPLY_FALLBACK: &str = "I received your message but couldn't generate a proper response. Please try rephrasing your question.";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream returned {status}")]
    Status { status: u16, body: String },

    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),

    #[error("upstream transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream payload could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpstreamMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpstreamContext {
    pub chain_ids: Vec<u64>,
}

/// The provider's request schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpstreamRequest {
    pub messages: Vec<UpstreamMessage>,
    pub context: UpstreamContext,
    pub stream: bool,
}

impl UpstreamRequest {
    /// Single user turn, empty chain context, streaming off.
    pub fn single_turn(content: impl Into<String>) -> Self {
        Self {
            messages: vec![UpstreamMessage {
                role: "user".to_string(),
                content: content.into(),
            }],
            context: UpstreamContext::default(),
            stream: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpstreamResponse {
    pub message: Option<String>,
    pub response: Option<String>,
    pub usage: Option<Value>,
}

impl UpstreamResponse {
    /// Pick the known fields out of any JSON reply. Fields of the wrong type
    /// count as absent; `usage` is kept as-is unless it is `null`.
    pub fn from_json(body: &Value) -> Self {
        let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            message: text("message"),
            response: text("response"),
            usage: body.get("usage").filter(|u| !u.is_null()).cloned(),
        }
    }

    /// `message`, then `response`, then the canned fallback. Empty strings are skipped.
    pub fn reply(&self) -> String {
        [&self.message, &self.response]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| NO_REPLY_FALLBACK.to_string())
    }
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(
        &self,
        api_key: &ApiKey,
        request: &UpstreamRequest,
    ) -> Result<UpstreamResponse, UpstreamError>;
}

/// HTTP client for the hosted chat API.
#[derive(Debug, Clone)]
pub struct ThirdwebProvider {
    client: Client,
    url: String,
    timeout: Duration,
}

impl ThirdwebProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
        }
    }

    async fn send(
        &self,
        api_key: &ApiKey,
        request: &UpstreamRequest,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let response = self
            .client
            .post(&self.url)
            .header(SECRET_KEY_HEADER, api_key.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            tracing::error!(status = status.as_u16(), body = %body, "upstream AI API error");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))?;
        Ok(UpstreamResponse::from_json(&body))
    }
}

#[async_trait]
impl ChatProvider for ThirdwebProvider {
    async fn complete(
        &self,
        api_key: &ApiKey,
        request: &UpstreamRequest,
    ) -> Result<UpstreamResponse, UpstreamError> {
        // One attempt, bounded by the configured deadline.
        match tokio::time::timeout(self.timeout, self.send(api_key, request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(timeout = ?self.timeout, url = %self.url, "upstream AI API timed out");
                Err(UpstreamError::Timeout(self.timeout))
            }
        }
    }
}
