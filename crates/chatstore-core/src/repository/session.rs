//! Session repository trait definition.

use chatstore_types::error::RepositoryError;
use chatstore_types::session::{Session, SessionFilter};
use uuid::Uuid;

/// Repository trait for chat session persistence.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait SessionRepository: Send + Sync {
    /// Insert a new session and return the stored record.
    fn create(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<Session, RepositoryError>> + Send;

    /// Get a session by its unique ID.
    fn get_by_id(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// List sessions matching the filter, ordered by `updated_at` DESC.
    fn list(
        &self,
        filter: &SessionFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Session>, RepositoryError>> + Send;

    /// Overwrite the mutable fields of an existing session.
    ///
    /// Returns `NotFound` if no row matched.
    fn update(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<Session, RepositoryError>> + Send;

    /// Delete a session and every message that belongs to it.
    ///
    /// Both deletes happen in one transaction. Returns `NotFound` if the
    /// session did not exist.
    fn delete(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
