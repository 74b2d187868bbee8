//! Message repository trait definition.
//!
//! Messages always belong to a session. Appending one also refreshes the
//! owning session's `updated_at`.

use chatstore_types::error::RepositoryError;
use chatstore_types::message::Message;
use uuid::Uuid;

/// Repository trait for chat message persistence.
pub trait MessageRepository: Send + Sync {
    /// Append a message to its session.
    ///
    /// Returns `NotFound` without writing anything when `message.session_id`
    /// does not reference an existing session. The insert and the session
    /// touch commit together.
    fn append(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;

    /// Get a window of a session's messages, ordered by `created_at` ASC.
    fn list_by_session(
        &self,
        session_id: &Uuid,
        skip: u64,
        take: u64,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Total number of messages in a session.
    fn count_by_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
