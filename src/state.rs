// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::relay::RelayService;
use crate::services::upstream::{ChatProvider, ThirdwebProvider};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub relay: RelayService,
}

impl AppState {
    /// State backed by the real HTTP provider.
    pub fn new(config: &Config) -> Self {
        let provider = ThirdwebProvider::new(config.upstream_url.clone(), config.upstream_timeout);
        Self::with_provider(Arc::new(provider), config)
    }

    pub fn with_provider(provider: Arc<dyn ChatProvider>, config: &Config) -> Self {
        Self {
            relay: RelayService::new(provider, config.api_key.clone()),
        }
    }
}
