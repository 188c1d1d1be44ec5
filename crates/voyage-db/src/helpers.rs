//! Row parsing, ID generation, and storage error translation helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity structs.
//! These helpers isolate the parsing logic and handle the dual datetime format
//! (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, Utc};

use crate::error::DatabaseError;

/// Extended result codes for the two constraint kinds that mean "already exists".
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER 0/1 column as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Generate a prefixed ID via libSQL on the given connection. Returns e.g. `"tch-a3f8b2c1"`.
///
/// Takes a connection rather than the database so it can run inside an open
/// transaction (`libsql::Transaction` derefs to `Connection`).
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails or returns no rows.
pub async fn generate_id(conn: &libsql::Connection, prefix: &str) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}

/// Whether a storage error is a unique constraint violation on a natural key.
///
/// Foreign key, NOT NULL, and CHECK failures share the primary constraint code
/// but are not "already exists" conditions, so they return `false`. A
/// primary-key collision is a generated-id clash, not a duplicate entity, and
/// also returns `false`.
#[must_use]
pub fn is_unique_violation(error: &libsql::Error) -> bool {
    match error {
        libsql::Error::SqliteFailure(SQLITE_CONSTRAINT_PRIMARYKEY, _) => false,
        libsql::Error::SqliteFailure(code, message) => {
            *code == SQLITE_CONSTRAINT_UNIQUE || is_unique_message(message)
        }
        other => is_unique_message(&other.to_string()),
    }
}

/// Every table keys on a generated `id` column, so a failure naming only
/// `<table>.id` is a primary-key collision even when the driver reports the
/// bare constraint code.
fn is_unique_message(message: &str) -> bool {
    message
        .split_once("UNIQUE constraint failed: ")
        .is_some_and(|(_, columns)| !is_primary_key_column(columns))
}

fn is_primary_key_column(columns: &str) -> bool {
    let columns = columns.trim();
    !columns.contains(',')
        && columns
            .split_once('.')
            .is_some_and(|(_, column)| column == "id")
}

/// Translate the result of a constrained write.
///
/// A unique violation becomes `DatabaseError::Conflict` carrying the message
/// built by `conflict`; every other error propagates unchanged.
///
/// # Errors
///
/// Returns the translated error when `result` is `Err`.
pub fn map_unique_violation<T>(
    result: Result<T, libsql::Error>,
    conflict: impl FnOnce() -> String,
) -> Result<T, DatabaseError> {
    result.map_err(|error| {
        if is_unique_violation(&error) {
            DatabaseError::Conflict(conflict())
        } else {
            DatabaseError::LibSql(error)
        }
    })
}
