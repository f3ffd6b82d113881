use axum::{
    Json, body::Bytes, extract::rejection::BytesRejection, http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Value, json};

use crate::services::webhook;

/// `POST /api/webhook`
pub async fn webhook_handler(body: Result<Bytes, BytesRejection>) -> impl IntoResponse {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "webhook error");
            return failure();
        }
    };

    match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Null) => {
            tracing::error!("webhook error: payload is null");
            failure()
        }
        Ok(payload) => {
            webhook::record(&payload);
            (StatusCode::OK, Json(json!({ "success": true })))
        }
        Err(e) => {
            tracing::error!(error = %e, "webhook error");
            failure()
        }
    }
}

fn failure() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Webhook processing failed" })),
    )
}

/// `GET /api/webhook` liveness probe.
pub async fn webhook_status_handler() -> Json<Value> {
    Json(json!({
        "message": "thirdweb AI Mini App Webhook",
        "status": "active"
    }))
}
