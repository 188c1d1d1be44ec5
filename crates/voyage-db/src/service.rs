//! Service layer hosting every tech-stack operation.
//!
//! `TechStackService` wraps `VoyageDb` and the retry policy. All repo methods
//! are implemented as `impl TechStackService` blocks under `repos/`.

use std::sync::Arc;
use std::time::Duration;

use voyage_config::VoyageConfig;

use crate::VoyageDb;
use crate::error::DatabaseError;
use crate::retry::RetryConfig;

/// Entry point for all voting, selection, proposal, and catalog operations.
///
/// Cheap to clone; clones share the same database handle, so one service can
/// be driven from many tasks at once. Every mutation follows this protocol:
/// 1. Validate the request (no storage access)
/// 2. Resolve the caller's team membership
/// 3. Begin an immediate transaction on a fresh connection
/// 4. Execute SQL, translating unique violations into conflicts
/// 5. Commit, or roll back on any error
#[derive(Clone)]
pub struct TechStackService {
    db: Arc<VoyageDb>,
    retry: RetryConfig,
}

impl TechStackService {
    /// Open a service over a local database file.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        busy_timeout: Duration,
        retry: RetryConfig,
    ) -> Result<Self, DatabaseError> {
        let db = VoyageDb::open_local(db_path, busy_timeout).await?;
        Ok(Self::from_db(db, retry))
    }

    /// Open a service using the `database` and `retry` sections of the config.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &VoyageConfig) -> Result<Self, DatabaseError> {
        Self::new_local(
            &config.database.path,
            Duration::from_millis(config.database.busy_timeout_ms),
            RetryConfig::from(&config.retry),
        )
        .await
    }

    /// Wrap an already opened database.
    #[must_use]
    pub fn from_db(db: VoyageDb, retry: RetryConfig) -> Self {
        Self {
            db: Arc::new(db),
            retry,
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub fn db(&self) -> &VoyageDb {
        &self.db
    }

    /// Access the retry policy applied to write transactions.
    #[must_use]
    pub const fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Open an immediate (write-locking) transaction on a fresh connection.
    pub(crate) async fn begin_immediate(&self) -> Result<libsql::Transaction, DatabaseError> {
        let conn = self.db.connect().await?;
        Ok(conn
            .transaction_with_behavior(libsql::TransactionBehavior::Immediate)
            .await?)
    }
}

/// Commit `tx` if `result` is `Ok`, otherwise roll it back and return the error.
pub(crate) async fn settle<T>(
    tx: libsql::Transaction,
    result: Result<T, DatabaseError>,
) -> Result<T, DatabaseError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(%rollback, %error, "rollback failed after error");
            }
            Err(error)
        }
    }
}
