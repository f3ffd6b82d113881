use axum::{Json, body::Bytes, extract::State, extract::rejection::BytesRejection};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::{error::AppError, message::RelayResponse, state::SharedState};

/// `POST /api/relay-chat`
///
/// The body is read and parsed by hand so that unreadable, oversized or
/// malformed bodies become an internal error with an apology, not a bare
/// extractor rejection.
pub async fn relay_chat_handler(
    State(state): State<SharedState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RelayResponse>, AppError> {
    let span = tracing::info_span!("relay_chat", request_id = %Uuid::new_v4());

    async move {
        let body = body
            .map_err(|e| AppError::Internal(format!("request body could not be read: {e}")))?;
        let payload: Value = serde_json::from_slice(&body)
            .map_err(|e| AppError::Internal(format!("request body is not JSON: {e}")))?;

        let reply = state.relay.handle(&payload).await?;
        tracing::info!(reply_len = reply.response.len(), "relayed chat message");
        Ok::<_, AppError>(Json(reply))
    }
    .instrument(span)
    .await
}
