//! Session management service.
//!
//! Create, list, fetch, partially update and delete chat sessions. Deleting
//! a session removes its messages as well.

use chatstore_types::error::SessionError;
use chatstore_types::session::{
    CreateSessionRequest, Session, SessionFilter, UpdateSessionRequest, resolve_title,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::repository::session::SessionRepository;
use crate::service::now;

/// Service owning the session lifecycle.
pub struct SessionService<S: SessionRepository> {
    repo: S,
}

impl<S: SessionRepository> SessionService<S> {
    pub fn new(repo: S) -> Self {
        Self { repo }
    }

    /// Create a session for `owner_id`.
    ///
    /// A missing or blank title becomes the default title; new sessions are
    /// never favorites.
    pub async fn create_session(&self, request: CreateSessionRequest) -> Result<Session, SessionError> {
        if request.owner_id.trim().is_empty() {
            return Err(SessionError::InvalidInput("ownerId cannot be empty".to_string()));
        }

        let now = now();
        let session = Session {
            id: Uuid::now_v7(),
            owner_id: request.owner_id,
            title: resolve_title(request.title.as_deref()),
            is_favorite: false,
            created_at: now,
            updated_at: now,
        };

        let session = self.repo.create(&session).await?;
        info!(session_id = %session.id, owner_id = %session.owner_id, "session created");
        Ok(session)
    }

    /// List an owner's sessions, most recently active first.
    pub async fn list_sessions(
        &self,
        owner_id: &str,
        is_favorite: Option<bool>,
    ) -> Result<Vec<Session>, SessionError> {
        if owner_id.trim().is_empty() {
            return Err(SessionError::InvalidInput("ownerId is required".to_string()));
        }

        let filter = SessionFilter {
            owner_id: owner_id.to_string(),
            is_favorite,
        };
        let sessions = self.repo.list(&filter).await?;
        debug!(owner_id, count = sessions.len(), "listed sessions");
        Ok(sessions)
    }

    /// Get a session by ID.
    pub async fn get_session(&self, id: &Uuid) -> Result<Session, SessionError> {
        self.repo.get_by_id(id).await?.ok_or(SessionError::NotFound)
    }

    /// Apply the fields present in `request` and refresh `updated_at`.
    pub async fn update_session(
        &self,
        id: &Uuid,
        request: UpdateSessionRequest,
    ) -> Result<Session, SessionError> {
        let mut session = self.get_session(id).await?;

        if let Some(title) = request.title {
            if title.trim().is_empty() {
                return Err(SessionError::InvalidInput("title cannot be empty".to_string()));
            }
            session.title = title;
        }
        if let Some(is_favorite) = request.is_favorite {
            session.is_favorite = is_favorite;
        }
        session.updated_at = now();

        let session = self.repo.update(&session).await?;
        info!(session_id = %session.id, "session updated");
        Ok(session)
    }

    /// Delete a session and all of its messages.
    pub async fn delete_session(&self, id: &Uuid) -> Result<(), SessionError> {
        self.repo.delete(id).await?;
        info!(session_id = %id, "session deleted");
        Ok(())
    }
}
