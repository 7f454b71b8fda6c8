//! Domain errors for the shopping list service.

use thiserror::Error;

/// Domain-level errors that can occur while handling a chat event.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("List store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Reply failed: {0}")]
    ReplyFailed(String),
}

impl DomainError {
    /// Whether the error means the backing store was never usable, as opposed
    /// to a single call failing.
    pub const fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        Self::ReplyFailed(err.to_string())
    }
}
