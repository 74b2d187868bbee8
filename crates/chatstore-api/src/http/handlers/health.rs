//! Liveness and database health.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use chatstore_infra::sqlite::pool::DatabasePool;

use crate::state::AppState;

/// Body of `GET /health` and `chatstore health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// `ok` when the database answered, `degraded` otherwise.
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub db: &'static str,
    pub uptime_seconds: u64,
    pub version: &'static str,
}

impl HealthReport {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Run a `SELECT 1` against the reader pool and build a report.
pub async fn probe(pool: &DatabasePool, started_at: Instant) -> HealthReport {
    let db_up = match pool.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "database health probe failed");
            false
        }
    };

    HealthReport {
        status: if db_up { "ok" } else { "degraded" },
        timestamp: Utc::now(),
        db: if db_up { "up" } else { "down" },
        uptime_seconds: started_at.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION"),
    }
}

/// GET /health - no auth, not rate limited.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    Json(probe(&state.db_pool, state.started_at).await)
}
