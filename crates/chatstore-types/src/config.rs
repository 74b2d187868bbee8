//! Server configuration types for Chatstore.
//!
//! `ServerConfig` is the merged result of built-in defaults, an optional
//! `chatstore.toml` file and environment/CLI overrides. Every field has a
//! default so a bare `chatstore serve` starts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder API key used when nothing is configured.
pub const DEFAULT_API_KEY: &str = "changeme";

/// Top-level configuration for the HTTP server.
#[derive(Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared secret expected in the `x-api-key` header.
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Allowed CORS origins. A single `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// sqlx connection URL for the SQLite database.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default)]
    pub rate_limit: RateLimitSettings,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_key() -> String {
    DEFAULT_API_KEY.to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_database_url() -> String {
    "sqlite://chatstore.db?mode=rwc".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_key: default_api_key(),
            cors_origins: default_cors_origins(),
            database_url: default_database_url(),
            rate_limit: RateLimitSettings::default(),
            otel: false,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// True when the API key was never changed from the placeholder.
    pub fn uses_default_api_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY
    }

    /// True when any origin may call the API.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

// The API key never appears in logs.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &"[REDACTED]")
            .field("cors_origins", &self.cors_origins)
            .field("database_url", &self.database_url)
            .field("rate_limit", &self.rate_limit)
            .field("otel", &self.otel)
            .finish()
    }
}

/// Sliding-window rate limit settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// Window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Requests allowed per client within one window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

fn default_window_secs() -> u64 {
    60
}

fn default_max_requests() -> u32 {
    100
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
        }
    }
}

/// Split a comma-separated origin list (`"https://a.io, https://b.io"`).
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
