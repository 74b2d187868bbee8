//! Message HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/sessions/{id}/messages - Append a message
//! - GET  /api/v1/sessions/{id}/messages - Page through messages, oldest first

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use chatstore_core::access::Scope;
use chatstore_core::pagination::PageRequest;
use chatstore_types::message::{CreateMessageRequest, Message};
use chatstore_types::page::Page;

use super::parse_uuid;
use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::extractors::validated::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// Query parameters for message listing. Both are 1-based.
#[derive(Debug, Deserialize)]
pub struct MessageListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// POST /api/v1/sessions/{id}/messages - Append a message to a session.
pub async fn create_message(
    State(state): State<AppState>,
    auth: Authenticated,
    ApiPath(session_id): ApiPath<String>,
    ApiJson(request): ApiJson<CreateMessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    auth.require(Scope::MessagesWrite)?;
    let sid = parse_uuid(&session_id)?;
    let message = state.message_service.create_message(&sid, request).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/v1/sessions/{id}/messages?page=..&limit=.. - List messages.
pub async fn list_messages(
    State(state): State<AppState>,
    auth: Authenticated,
    ApiPath(session_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<MessageListQuery>,
) -> Result<Json<Page<Message>>, AppError> {
    auth.require(Scope::MessagesRead)?;
    let sid = parse_uuid(&session_id)?;
    let request = PageRequest::new(query.page, query.limit).map_err(AppError::Validation)?;
    Ok(Json(state.message_service.list_messages(&sid, request).await?))
}
