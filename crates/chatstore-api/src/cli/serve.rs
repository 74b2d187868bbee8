//! `chatstore serve`: run the REST API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;

use chatstore_core::throttle::SlidingWindowLimiter;
use chatstore_types::config::ServerConfig;

use crate::http;
use crate::state::AppState;

pub async fn serve(config: ServerConfig, quiet: bool) -> Result<()> {
    if config.uses_default_api_key() {
        tracing::warn!("API_KEY is the built-in default; set a real key before exposing the server");
    }

    let addr = config.bind_addr();
    let state = AppState::init(config)
        .await
        .context("failed to open database")?;

    spawn_limiter_pruning(state.limiter.clone());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    if !quiet {
        println!();
        println!(
            "  {} Chatstore API listening on {}",
            style("⚡").bold(),
            style(format!("http://{addr}")).cyan()
        );
        println!("  {}", style("Press Ctrl+C to stop").dim());
        println!();
    }
    tracing::info!(%addr, "server started");

    let db_pool = state.db_pool.clone();
    let router = http::router::build_router(state);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    db_pool.close().await;
    tracing::info!("server stopped");
    Ok(())
}

/// Drop idle limiter buckets once per window.
fn spawn_limiter_pruning(limiter: Arc<SlidingWindowLimiter>) {
    let period = limiter.config().window;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = limiter.prune();
            if removed > 0 {
                tracing::debug!(removed, tracked = limiter.tracked_clients(), "pruned rate limit buckets");
            }
        }
    });
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
