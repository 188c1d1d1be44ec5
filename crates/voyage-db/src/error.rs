//! Database error types for voyage-db.
//!
//! Domain failures (`NotFound`, `BadRequest`, `Conflict`) and storage failures
//! share one enum; [`DatabaseError::kind`] classifies them for the boundary.

use thiserror::Error;
use voyage_core::errors::{CoreError, ErrorKind};

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Caller identity invalid for the team, or a malformed reference.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A uniqueness constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request validation that ran before any storage access.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Classify this error for status-code mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Core(core) => core.kind(),
            Self::Query(_)
            | Self::Migration(_)
            | Self::NoResult
            | Self::InvalidState(_)
            | Self::LibSql(_)
            | Self::Other(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn invalid_member(user_id: &str, team_id: &str) -> Self {
        Self::BadRequest(format!(
            "Invalid user or team: user {user_id} is not a member of team {team_id}"
        ))
    }
}
