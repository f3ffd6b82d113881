// src/services/relay.rs
use std::sync::Arc;

use serde_json::Value;

use crate::config::ApiKey;
use crate::error::AppError;
use crate::message::RelayResponse;
use crate::services::upstream::{ChatProvider, UpstreamRequest};

/// Stateless relay between the chat widget and the upstream provider.
///
/// Holds the only copy of the upstream credential.
#[derive(Clone)]
pub struct RelayService {
    provider: Arc<dyn ChatProvider>,
    api_key: Option<ApiKey>,
}

impl std::fmt::Debug for RelayService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayService")
            .field("configured", &self.api_key.is_some())
            .finish()
    }
}

impl RelayService {
    pub fn new(provider: Arc<dyn ChatProvider>, api_key: Option<ApiKey>) -> Self {
        Self { provider, api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate an inbound body, forward it upstream and map the reply.
    pub async fn handle(&self, body: &Value) -> Result<RelayResponse, AppError> {
        let message = validate(body)?;

        let Some(api_key) = &self.api_key else {
            tracing::error!("THIRDWEB_API_KEY is not set; refusing to relay");
            return Err(AppError::Configuration);
        };

        let request = UpstreamRequest::single_turn(message);
        let reply = self.provider.complete(api_key, &request).await?;

        Ok(RelayResponse {
            response: reply.reply(),
            usage: reply.usage,
        })
    }
}

/// Extract the trimmed `message` string, rejecting anything else.
pub fn validate(body: &Value) -> Result<&str, AppError> {
    let message = body.get("message");
    tracing::debug!(has_message = message.is_some(), "relay payload received");

    match message.and_then(Value::as_str).map(str::trim) {
        Some(m) if !m.is_empty() => Ok(m),
        _ => Err(AppError::Validation),
    }
}
