//! Per-client rate limiting middleware.
//!
//! Clients are keyed by peer IP when the server runs with connect info, then
//! by the first `x-forwarded-for` entry, then by one shared bucket.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use crate::http::error::AppError;
use crate::state::AppState;

const ANONYMOUS_CLIENT: &str = "anonymous";

pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = client_key(&req);
    let decision = state.limiter.check(&client);

    if !decision.allowed {
        // Retry-After is whole seconds, rounded up.
        let retry_after_secs = decision
            .retry_after
            .as_secs()
            .saturating_add(u64::from(decision.retry_after.subsec_nanos() > 0))
            .max(1);
        tracing::warn!(client = %client, retry_after_secs, "rate limit exceeded");
        return Err(AppError::RateLimited {
            limit: decision.limit,
            retry_after_secs,
        });
    }

    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert("x-ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(decision.remaining));
    Ok(response)
}

fn client_key(req: &Request) -> String {
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    req.headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or(ANONYMOUS_CLIENT)
        .to_string()
}
