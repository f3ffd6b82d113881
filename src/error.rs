// src/error.rs
//! Relay error taxonomy. Every variant renders as `{ error, response }` so
//! the client can show any failure as an ordinary assistant bubble.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorBody;
use crate::services::upstream::UpstreamError;

pub const VALIDATION_ERROR: &str = "Message is required and must be a non-empty string";
pub const VALIDATION_RESPONSE: &str = "Please type a message before sending.";

pub const CONFIGURATION_ERROR: &str = "AI service not configured";
pub const CONFIGURATION_RESPONSE: &str =
    "I'm sorry, but the AI service is not properly configured. Please contact the administrator.";

pub const UPSTREAM_ERROR: &str = "AI service temporarily unavailable";
pub const UPSTREAM_RESPONSE: &str = "I'm sorry, I'm having trouble connecting to the AI service right now. Please try again in a moment.";

pub const INTERNAL_ERROR: &str = "Internal server error";
pub const INTERNAL_RESPONSE: &str =
    "I'm sorry, something went wrong while processing your request. Please try again.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid relay request")]
    Validation,

    #[error("upstream credential is not configured")]
    Configuration,

    #[error("upstream unavailable: {0}")]
    Upstream(#[source] UpstreamError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation => StatusCode::BAD_REQUEST,
            AppError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let (error, response) = match self {
            AppError::Validation => (VALIDATION_ERROR, VALIDATION_RESPONSE),
            AppError::Configuration => (CONFIGURATION_ERROR, CONFIGURATION_RESPONSE),
            AppError::Upstream(_) => (UPSTREAM_ERROR, UPSTREAM_RESPONSE),
            AppError::Internal(_) => (INTERNAL_ERROR, INTERNAL_RESPONSE),
        };
        ErrorBody {
            error: error.to_string(),
            response: response.to_string(),
        }
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status { .. } | UpstreamError::Timeout(_) => AppError::Upstream(err),
            UpstreamError::Transport(_) | UpstreamError::Decode(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Detail stays in the server log; the client only gets the fixed texts.
        match &self {
            AppError::Validation => tracing::debug!("rejected relay request without a usable message"),
            AppError::Configuration => {}
            AppError::Upstream(err) => tracing::warn!(error = %err, "upstream call failed"),
            AppError::Internal(detail) => tracing::error!(detail = %detail, "relay request failed"),
        }
        (self.status(), Json(self.body())).into_response()
    }
}
