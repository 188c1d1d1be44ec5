//! Error reporting at the process boundary.

use serde::Serialize;
use voyage_core::errors::{CoreError, ErrorKind};
use voyage_db::error::DatabaseError;

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    kind: ErrorKind,
    message: String,
}

/// Classify a command failure by the first domain error in its cause chain.
pub fn classify(error: &anyhow::Error) -> ErrorKind {
    for cause in error.chain() {
        if let Some(db) = cause.downcast_ref::<DatabaseError>() {
            return db.kind();
        }
        if let Some(core) = cause.downcast_ref::<CoreError>() {
            return core.kind();
        }
        if cause.is::<serde_json::Error>() {
            return ErrorKind::BadRequest;
        }
    }
    ErrorKind::Internal
}

#[must_use]
pub const fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::BadRequest => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Conflict => 4,
    }
}

fn envelope(error: &anyhow::Error) -> ErrorEnvelope {
    let kind = classify(error);
    ErrorEnvelope {
        error: ErrorBody {
            status: kind.status_code(),
            kind,
            message: format!("{error:#}"),
        },
    }
}

/// Print the error as JSON on stderr and return the process exit code.
pub fn report(error: &anyhow::Error) -> i32 {
    let envelope = envelope(error);
    match serde_json::to_string(&envelope) {
        Ok(line) => eprintln!("{line}"),
        Err(_) => eprintln!("voyage error: {error:#}"),
    }
    exit_code(envelope.error.kind)
}

#[cfg(test)]
mod tests {
    use anyhow::Context;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn database_errors_keep_their_kind_through_context() {
        let error = Err::<(), _>(DatabaseError::Conflict("Member mbr-1 already voted".into()))
            .context("vote add failed")
            .unwrap_err();
        assert_eq!(classify(&error), ErrorKind::Conflict);
        assert_eq!(exit_code(classify(&error)), 4);
    }

    #[test]
    fn core_validation_is_bad_request() {
        let error = anyhow::Error::from(CoreError::Validation("tech name is empty".into()));
        assert_eq!(classify(&error), ErrorKind::BadRequest);
        assert_eq!(exit_code(ErrorKind::BadRequest), 2);
    }

    #[test]
    fn malformed_json_is_bad_request() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = anyhow::Error::from(parse).context("invalid selection payload");
        assert_eq!(classify(&error), ErrorKind::BadRequest);
    }

    #[test]
    fn unknown_errors_are_internal() {
        let error = anyhow::anyhow!("disk on fire");
        assert_eq!(classify(&error), ErrorKind::Internal);
        assert_eq!(exit_code(ErrorKind::Internal), 1);
    }

    #[test]
    fn envelope_carries_status_kind_and_message() {
        let error = anyhow::Error::from(DatabaseError::NotFound {
            entity: "Voyage team",
            key: "vtm-00000000".into(),
        });
        let json = serde_json::to_value(envelope(&error)).unwrap();
        assert_eq!(json["error"]["status"], 404);
        assert_eq!(json["error"]["kind"], "not_found");
        assert_eq!(json["error"]["message"], "Voyage team not found: vtm-00000000");
        assert_eq!(exit_code(ErrorKind::NotFound), 3);
    }
}
