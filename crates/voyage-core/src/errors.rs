//! Cross-cutting error types for voyage.
//!
//! `ErrorKind` is the taxonomy every failure is classified into before it
//! reaches a boundary. Storage errors live in `voyage-db`; the CLI maps kinds
//! to status and exit codes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced entity (team, vote, tech item, category) does not exist.
    NotFound,
    /// Caller identity invalid for the team, selection cap exceeded, or a malformed reference.
    BadRequest,
    /// A uniqueness constraint rejected the write.
    Conflict,
    /// Anything else. Storage failures land here unchanged.
    Internal,
}

impl ErrorKind {
    /// HTTP-style status code for transport layers.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::BadRequest => 400,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can be raised without touching storage.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Request data failed validation (cap, empty names, malformed payload).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::BadRequest,
        }
    }
}
