//! Application error type mapping to HTTP status codes and the error body.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatstore_core::access::AccessError;
use chatstore_types::error::{MessageError, SessionError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Session-related errors.
    Session(SessionError),
    /// Message-related errors.
    Message(MessageError),
    /// Missing or invalid API key.
    Unauthorized(String),
    /// Valid key without the scope the route needs.
    Forbidden(String),
    /// Client exhausted its request window.
    RateLimited { limit: u32, retry_after_secs: u64 },
    /// No route under the API prefix matched.
    RouteNotFound,
    /// Validation error.
    Validation(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl From<MessageError> for AppError {
    fn from(e: MessageError) -> Self {
        AppError::Message(e)
    }
}

impl From<AccessError> for AppError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::MissingScope(_) => AppError::Forbidden(e.to_string()),
            AccessError::MissingCredential | AccessError::InvalidCredential => {
                AppError::Unauthorized(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Session(SessionError::NotFound)
            | AppError::Message(MessageError::SessionNotFound) => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                "Session not found".to_string(),
            ),
            AppError::Session(SessionError::InvalidInput(msg))
            | AppError::Message(MessageError::InvalidInput(msg))
            | AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Session(SessionError::StorageError(detail))
            | AppError::Message(MessageError::StorageError(detail)) => {
                tracing::error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::RateLimited { retry_after_secs, .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                format!("Too many requests, retry in {retry_after_secs}s"),
            ),
            AppError::RouteNotFound => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", "Route not found".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = json!({
            "errors": [{
                "code": code,
                "message": message,
            }],
            "meta": {
                "timestamp": chrono::Utc::now().to_rfc3339(),
            },
        });

        let mut response = (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response();

        if let AppError::RateLimited {
            limit,
            retry_after_secs,
        } = self
        {
            let headers = response.headers_mut();
            headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
            headers.insert("x-ratelimit-limit", HeaderValue::from(limit));
            headers.insert("x-ratelimit-remaining", HeaderValue::from(0u32));
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatstore_core::access::Scope;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Session(SessionError::NotFound), StatusCode::NOT_FOUND),
            (AppError::Message(MessageError::SessionNotFound), StatusCode::NOT_FOUND),
            (
                AppError::Message(MessageError::InvalidInput("blank".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Session(SessionError::StorageError("disk".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::from(AccessError::MissingCredential), StatusCode::UNAUTHORIZED),
            (
                AppError::from(AccessError::MissingScope(Scope::MessagesWrite)),
                StatusCode::FORBIDDEN,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_storage_detail_not_leaked() {
        let (_, code, message) =
            AppError::Session(SessionError::StorageError("database is locked".into())).parts();
        assert_eq!(code, "INTERNAL_ERROR");
        assert!(!message.contains("locked"));
    }

    #[test]
    fn test_rate_limited_sets_retry_after() {
        let response = AppError::RateLimited {
            limit: 5,
            retry_after_secs: 12,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "12");
        assert_eq!(response.headers()["x-ratelimit-remaining"], "0");
    }
}
