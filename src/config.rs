// src/config.rs
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.thirdweb.com/ai/chat";
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Secret credential for the upstream AI service.
///
/// `Debug` is redacted so the key never lands in a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for an empty or whitespace-only value.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub upstream_url: String,
    /// `None` keeps the server running; every relay call then answers with
    /// a configuration error instead of contacting upstream.
    pub api_key: Option<ApiKey>,
    pub upstream_timeout: Duration,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_level: String,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            api_key: None,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            log_level: "info".to_string(),
            static_dir: PathBuf::from("public"),
        }
    }
}

impl Config {
    /// Read configuration from the process environment. Call once at startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            bind_address: lookup("RELAY_BIND").unwrap_or(defaults.bind_address),
            upstream_url: lookup("THIRDWEB_AI_URL").unwrap_or(defaults.upstream_url),
            api_key: lookup("THIRDWEB_API_KEY").and_then(ApiKey::new),
            upstream_timeout: lookup("RELAY_UPSTREAM_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
            log_level: lookup("RELAY_LOG").unwrap_or(defaults.log_level),
            static_dir: lookup("RELAY_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = ApiKey::new(key);
        self
    }
}
