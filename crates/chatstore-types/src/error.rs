use thiserror::Error;

/// Errors related to session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,

    #[error("invalid session input: {0}")]
    InvalidInput(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to message operations.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The referenced session does not exist.
    #[error("session not found")]
    SessionNotFound,

    #[error("invalid message input: {0}")]
    InvalidInput(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in chatstore-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

impl From<RepositoryError> for SessionError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => SessionError::NotFound,
            other => SessionError::StorageError(other.to_string()),
        }
    }
}

impl From<RepositoryError> for MessageError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => MessageError::SessionNotFound,
            other => MessageError::StorageError(other.to_string()),
        }
    }
}
