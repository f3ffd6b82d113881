// src/routes/mod.rs
pub mod chat;
pub mod webhook;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::relay_chat_handler;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use webhook::{webhook_handler, webhook_status_handler};

pub fn create_router() -> Router<SharedState> {
    let api_routes = Router::new()
        .route("/relay-chat", post(relay_chat_handler))
        .route("/webhook", get(webhook_status_handler).post(webhook_handler));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
