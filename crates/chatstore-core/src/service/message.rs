//! Message service: append messages to sessions and page through them.

use chatstore_types::error::MessageError;
use chatstore_types::message::{CreateMessageRequest, Message};
use chatstore_types::page::Page;
use tracing::{debug, info};
use uuid::Uuid;

use crate::pagination::PageRequest;
use crate::repository::message::MessageRepository;
use crate::service::now;

/// Service owning message persistence for sessions.
pub struct MessageService<M: MessageRepository> {
    repo: M,
}

impl<M: MessageRepository> MessageService<M> {
    pub fn new(repo: M) -> Self {
        Self { repo }
    }

    /// Append a message to `session_id`.
    ///
    /// Fails with `SessionNotFound` (and writes nothing) when the session does
    /// not exist. On success the session's `updated_at` is moved to the
    /// message's `created_at`.
    pub async fn create_message(
        &self,
        session_id: &Uuid,
        request: CreateMessageRequest,
    ) -> Result<Message, MessageError> {
        if request.content.trim().is_empty() {
            return Err(MessageError::InvalidInput("content cannot be empty".to_string()));
        }

        let message = Message {
            id: Uuid::now_v7(),
            session_id: *session_id,
            role: request.role,
            content: request.content,
            context: request.context,
            created_at: now(),
        };

        let message = self.repo.append(&message).await?;
        info!(
            session_id = %message.session_id,
            message_id = %message.id,
            role = %message.role,
            "message appended"
        );
        Ok(message)
    }

    /// Get one page of a session's messages in chronological order.
    ///
    /// An unknown session yields an empty page rather than an error.
    pub async fn list_messages(
        &self,
        session_id: &Uuid,
        request: PageRequest,
    ) -> Result<Page<Message>, MessageError> {
        let total = self.repo.count_by_session(session_id).await?;
        let window = request.window(total);

        let items = if window.skip >= total {
            Vec::new()
        } else {
            self.repo
                .list_by_session(session_id, window.skip, window.take)
                .await?
        };

        debug!(
            session_id = %session_id,
            page = request.page,
            limit = request.limit,
            total,
            "listed messages"
        );

        Ok(Page {
            items,
            page: request.page,
            limit: request.limit,
            total,
            total_pages: window.total_pages,
        })
    }
}
