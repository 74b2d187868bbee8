//! `chatstore health`: probe the configured database once.

use std::time::Instant;

use anyhow::{Context, Result};
use console::style;

use chatstore_infra::sqlite::pool::DatabasePool;
use chatstore_types::config::ServerConfig;

use crate::http::handlers::health::probe;

/// Print a health report. Fails when the database is unreachable.
pub async fn health(config: ServerConfig, json: bool) -> Result<()> {
    let started_at = Instant::now();
    let pool = DatabasePool::new(&config.database_url)
        .await
        .context("failed to open database")?;
    let report = probe(&pool, started_at).await;
    pool.close().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let mark = if report.is_ok() {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!();
        println!("  {} Chatstore v{}", style("⚡").bold(), report.version);
        println!("  {mark} database {}", report.db);
        println!();
    }

    if !report.is_ok() {
        anyhow::bail!("database is {}", report.db);
    }
    Ok(())
}
