use std::sync::Arc;

use anyhow::Context;
use tower_http::services::ServeDir;

use relay_chat::{config::Config, init_tracing, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    init_tracing(&config.log_level);

    if config.api_key.is_none() {
        tracing::warn!("THIRDWEB_API_KEY is not set; relay requests will fail until it is configured");
    }

    let state = Arc::new(AppState::new(&config));

    let app = routes::create_router()
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    tracing::info!(
        address = %config.bind_address,
        upstream = %config.upstream_url,
        timeout = ?config.upstream_timeout,
        "relay chat server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("relay chat server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}
