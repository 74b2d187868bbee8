//! Session CRUD HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions       - Create a session
//! - GET    /api/v1/sessions       - List an owner's sessions
//! - GET    /api/v1/sessions/{id}  - Get a single session
//! - PATCH  /api/v1/sessions/{id}  - Update title / favorite flag
//! - DELETE /api/v1/sessions/{id}  - Delete a session and its messages

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use chatstore_core::access::Scope;
use chatstore_types::session::{CreateSessionRequest, Session, UpdateSessionRequest};

use super::parse_uuid;
use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::extractors::validated::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// Query parameters for session listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionListQuery {
    pub owner_id: Option<String>,
    /// `"true"` or `"false"`; anything else is rejected.
    pub favorite: Option<String>,
}

fn parse_favorite(raw: Option<&str>) -> Result<Option<bool>, AppError> {
    match raw {
        None => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(AppError::Validation(format!(
            "favorite must be 'true' or 'false', got '{other}'"
        ))),
    }
}

/// POST /api/v1/sessions - Create a session.
pub async fn create_session(
    State(state): State<AppState>,
    auth: Authenticated,
    ApiJson(request): ApiJson<CreateSessionRequest>,
) -> Result<(StatusCode, Json<Session>), AppError> {
    auth.require(Scope::SessionsWrite)?;
    let session = state.session_service.create_session(request).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/sessions?ownerId=..&favorite=.. - List an owner's sessions.
pub async fn list_sessions(
    State(state): State<AppState>,
    auth: Authenticated,
    ApiQuery(query): ApiQuery<SessionListQuery>,
) -> Result<Json<Vec<Session>>, AppError> {
    auth.require(Scope::SessionsRead)?;

    let owner_id = query
        .owner_id
        .ok_or_else(|| AppError::Validation("ownerId is required".to_string()))?;
    let is_favorite = parse_favorite(query.favorite.as_deref())?;

    let sessions = state
        .session_service
        .list_sessions(&owner_id, is_favorite)
        .await?;
    Ok(Json(sessions))
}

/// GET /api/v1/sessions/{id} - Get a session by ID.
pub async fn get_session(
    State(state): State<AppState>,
    auth: Authenticated,
    ApiPath(session_id): ApiPath<String>,
) -> Result<Json<Session>, AppError> {
    auth.require(Scope::SessionsRead)?;
    let sid = parse_uuid(&session_id)?;
    Ok(Json(state.session_service.get_session(&sid).await?))
}

/// PATCH /api/v1/sessions/{id} - Update a session.
pub async fn update_session(
    State(state): State<AppState>,
    auth: Authenticated,
    ApiPath(session_id): ApiPath<String>,
    ApiJson(request): ApiJson<UpdateSessionRequest>,
) -> Result<Json<Session>, AppError> {
    auth.require(Scope::SessionsWrite)?;
    let sid = parse_uuid(&session_id)?;
    let session = state.session_service.update_session(&sid, request).await?;
    Ok(Json(session))
}

/// DELETE /api/v1/sessions/{id} - Delete a session and its messages.
pub async fn delete_session(
    State(state): State<AppState>,
    auth: Authenticated,
    ApiPath(session_id): ApiPath<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require(Scope::SessionsWrite)?;
    let sid = parse_uuid(&session_id)?;
    state.session_service.delete_session(&sid).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
