//! API key authentication.
//!
//! [`require_api_key`] runs in front of every `/api/v1` route, including
//! unknown paths. It reads the `x-api-key` header, asks the configured
//! [`CredentialVerifier`](chatstore_core::access::CredentialVerifier) for a
//! grant and stores the grant in the request extensions. Handlers pull it back
//! out with the [`Authenticated`] extractor and check the scope they need.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use chatstore_core::access::{AccessError, AccessGrant, Scope, authorize};

use crate::http::error::AppError;
use crate::state::AppState;

/// Header carrying the shared API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware rejecting requests without a valid API key.
pub async fn require_api_key(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .map(|value| value.to_str().map_err(|_| AccessError::InvalidCredential))
        .transpose()?;

    let grant = match authorize(state.verifier.as_ref(), presented) {
        Ok(grant) => grant,
        Err(e) => {
            tracing::debug!(path = %req.uri().path(), reason = %e, "rejected request");
            return Err(e.into());
        }
    };

    tracing::debug!(principal = %grant.principal, path = %req.uri().path(), "request authorized");
    req.extensions_mut().insert(grant);
    Ok(next.run(req).await)
}

/// The grant attached by [`require_api_key`].
pub struct Authenticated(pub AccessGrant);

impl Authenticated {
    /// Fail with 403 unless the grant holds `scope`.
    pub fn require(&self, scope: Scope) -> Result<(), AppError> {
        Ok(self.0.require(scope)?)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AccessGrant>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| AppError::Unauthorized(AccessError::MissingCredential.to_string()))
    }
}
