//! # voyage-db
//!
//! libSQL storage and tech-stack voting operations for voyage teams.
//!
//! Holds all relational state: users, teams, memberships, tech categories,
//! team tech-stack items, and their votes. Every operation opens its own
//! connection; writes that must be serialized against each other run inside
//! `BEGIN IMMEDIATE` transactions, and uniqueness is enforced by the schema.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29).

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod retry;
pub mod service;

#[cfg(test)]
mod test_support;

use std::time::Duration;

use error::DatabaseError;
use libsql::Builder;

/// Storage handle for all voyage state.
///
/// Owns the libSQL database; hands out a freshly configured connection per
/// operation so concurrent operations never share a transaction.
pub struct VoyageDb {
    db: libsql::Database,
    path: String,
    busy_timeout: Duration,
}

impl VoyageDb {
    /// Open (or create) a local database file at the given path.
    ///
    /// Switches the file to WAL journaling and runs migrations. `:memory:` is
    /// rejected: each connection would see its own empty database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str, busy_timeout: Duration) -> Result<Self, DatabaseError> {
        if path == ":memory:" {
            return Err(DatabaseError::InvalidState(
                "in-memory databases are not supported; use a file path".into(),
            ));
        }

        let db = Builder::new_local(path).build().await?;
        let voyage_db = Self {
            db,
            path: path.to_string(),
            busy_timeout,
        };

        let conn = voyage_db.connect().await?;
        apply_pragma(&conn, "PRAGMA journal_mode = WAL")
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA journal_mode: {e}")))?;

        voyage_db.run_migrations().await?;
        tracing::debug!(path, "opened voyage database");
        Ok(voyage_db)
    }

    /// Open a new connection with foreign keys and the busy timeout applied.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection or its pragmas fail.
    pub async fn connect(&self) -> Result<libsql::Connection, DatabaseError> {
        let conn = self.db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Query(format!("PRAGMA foreign_keys: {e}")))?;
        apply_pragma(
            &conn,
            &format!("PRAGMA busy_timeout = {}", self.busy_timeout.as_millis()),
        )
        .await
        .map_err(|e| DatabaseError::Query(format!("PRAGMA busy_timeout: {e}")))?;

        Ok(conn)
    }

    /// Path of the database file.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Run a PRAGMA that reports its new value as a row, stepping it to completion.
async fn apply_pragma(conn: &libsql::Connection, sql: &str) -> Result<(), libsql::Error> {
    let mut rows = conn.query(sql, ()).await?;
    while rows.next().await?.is_some() {}
    Ok(())
}
