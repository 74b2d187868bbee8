//! CLI command definitions for the `chatstore` binary.
//!
//! Every setting can come from the config file, an environment variable or a
//! flag; flags and environment variables win over the file.

pub mod health;
pub mod serve;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use chatstore_infra::config::{ConfigOverrides, DEFAULT_CONFIG_FILE, load_config};
use chatstore_types::config::ServerConfig;

/// Chat session and message store with a REST API.
#[derive(Parser)]
#[command(name = "chatstore", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Machine-readable output: JSON logs for `serve`, raw JSON for `health`.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve(ConfigArgs),

    /// Check database connectivity and print a health report.
    Health(ConfigArgs),

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Configuration sources shared by commands that touch the database.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to a TOML config file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Address to bind.
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on.
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Shared API key expected in `x-api-key`.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Allowed CORS origins, comma-separated, or `*`.
    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// sqlx SQLite connection URL.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Rate limit window in seconds.
    #[arg(long, env = "RATE_LIMIT_TTL")]
    pub rate_limit_ttl: Option<u64>,

    /// Requests allowed per client per window.
    #[arg(long, env = "RATE_LIMIT_LIMIT")]
    pub rate_limit_limit: Option<u32>,

    /// Export spans through OpenTelemetry (stdout).
    #[arg(long, env = "CHATSTORE_OTEL")]
    pub otel: Option<bool>,
}

impl ConfigArgs {
    /// Merge defaults, the config file and these overrides.
    pub async fn resolve(self) -> anyhow::Result<ServerConfig> {
        let mut config = load_config(&self.config)
            .await
            .context("failed to load configuration")?;

        ConfigOverrides {
            host: self.host,
            port: self.port,
            api_key: self.api_key,
            cors_origin: self.cors_origin,
            database_url: self.database_url,
            rate_limit_window_secs: self.rate_limit_ttl,
            rate_limit_max_requests: self.rate_limit_limit,
            otel: self.otel,
        }
        .apply(&mut config);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_flags_parse() {
        let cli = Cli::try_parse_from([
            "chatstore",
            "-v",
            "serve",
            "--port",
            "8080",
            "--rate-limit-limit",
            "5",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.rate_limit_limit, Some(5));
        assert_eq!(args.config, PathBuf::from("custom.toml"));
    }

    #[tokio::test]
    async fn test_resolve_applies_flags_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chatstore.toml");
        tokio::fs::write(&path, "port = 4000\napi_key = \"from-file\"\n")
            .await
            .unwrap();

        let cli = Cli::try_parse_from([
            "chatstore",
            "serve",
            "--config",
            path.to_str().unwrap(),
            "--port",
            "4001",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        let config = args.resolve().await.unwrap();
        assert_eq!(config.port, 4001);
        assert_eq!(config.api_key, "from-file");
    }
}
