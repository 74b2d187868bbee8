//! Chat session types.
//!
//! A session is one conversation owned by an external user (`owner_id`).
//! Sessions carry a display title and a favorite flag; everything else is
//! managed by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to sessions created without one.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// A chat session owned by a user.
///
/// `updated_at` moves forward whenever the session is edited or a message is
/// appended to it, so listing by `updated_at DESC` yields most recently
/// active conversations first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a session. Only `owner_id` is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub owner_id: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Partial update for a session. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

/// Filter applied when listing an owner's sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub owner_id: String,
    /// `None` lists both favorites and non-favorites.
    pub is_favorite: Option<bool>,
}

/// Resolve the title for a new session, falling back to [`DEFAULT_SESSION_TITLE`]
/// when the caller sent nothing or only whitespace.
pub fn resolve_title(title: Option<&str>) -> String {
    match title {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => DEFAULT_SESSION_TITLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_title_defaults() {
        assert_eq!(resolve_title(None), "New Chat");
        assert_eq!(resolve_title(Some("")), "New Chat");
        assert_eq!(resolve_title(Some("   ")), "New Chat");
        assert_eq!(resolve_title(Some(" Trip plan ")), " Trip plan ");
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let session = Session {
            id: Uuid::now_v7(),
            owner_id: "u1".to_string(),
            title: "Hello".to_string(),
            is_favorite: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["ownerId"], "u1");
        assert_eq!(json["isFavorite"], true);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_create_request_title_optional() {
        let req: CreateSessionRequest = serde_json::from_str(r#"{"ownerId":"u1"}"#).unwrap();
        assert_eq!(req.owner_id, "u1");
        assert!(req.title.is_none());
    }

    #[test]
    fn test_update_request_fields_optional() {
        let req: UpdateSessionRequest = serde_json::from_str(r#"{"isFavorite":true}"#).unwrap();
        assert!(req.title.is_none());
        assert_eq!(req.is_favorite, Some(true));
    }
}
