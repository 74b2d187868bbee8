//! Server configuration loader.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! overrides collected from the environment and command line. A missing file
//! is not an error; a file that exists but cannot be read or parsed is.

use std::path::{Path, PathBuf};

use chatstore_types::config::{ServerConfig, parse_origin_list};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "chatstore.toml";

/// Errors from reading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load `path` on top of [`ServerConfig::default()`].
pub async fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(ServerConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str::<ServerConfig>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Values that take precedence over the config file when set.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_key: Option<String>,
    /// Comma-separated list, as found in `CORS_ORIGIN`.
    pub cors_origin: Option<String>,
    pub database_url: Option<String>,
    pub rate_limit_window_secs: Option<u64>,
    pub rate_limit_max_requests: Option<u32>,
    pub otel: Option<bool>,
}

impl ConfigOverrides {
    pub fn apply(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(api_key) = self.api_key {
            config.api_key = api_key;
        }
        if let Some(raw) = self.cors_origin {
            config.cors_origins = parse_origin_list(&raw);
        }
        if let Some(url) = self.database_url {
            config.database_url = url;
        }
        if let Some(secs) = self.rate_limit_window_secs {
            config.rate_limit.window_secs = secs;
        }
        if let Some(max) = self.rate_limit_max_requests {
            config.rate_limit.max_requests = max;
        }
        if let Some(otel) = self.otel {
            config.otel = otel;
        }
    }
}
