//! Lock-contention retry logic.
//!
//! Write transactions start with `BEGIN IMMEDIATE`, so concurrent writers queue
//! on SQLite's write lock. A connection waits up to its busy timeout; past that
//! the statement fails with `SQLITE_BUSY` ("database is locked"). Those
//! failures happen before anything is committed, so the whole operation is
//! safe to run again.

use std::future::Future;
use std::time::Duration;

use voyage_config::RetrySettings;

use crate::error::DatabaseError;

/// `SQLITE_BUSY` and `SQLITE_LOCKED` primary result codes.
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Configuration for retry behavior on lock contention.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from(&RetrySettings::default())
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            base_delay: Duration::from_millis(settings.base_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
        }
    }
}

impl RetryConfig {
    /// Backoff delay before retry number `retry` (1-based).
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Detect lock-contention errors.
///
/// The predicate is intentionally narrow: constraint violations and every
/// other SQL error are returned to the caller on the first attempt.
pub fn is_transient_lock_error(error: &DatabaseError) -> bool {
    let DatabaseError::LibSql(inner) = error else {
        return false;
    };
    if let libsql::Error::SqliteFailure(code, _) = inner {
        if matches!(*code & 0xff, SQLITE_BUSY | SQLITE_LOCKED) {
            return true;
        }
    }
    let msg = inner.to_string();
    msg.contains("database is locked") || msg.contains("database table is locked")
}

/// Run `operation`, re-running it with capped exponential backoff while it
/// fails with lock contention.
///
/// # Errors
///
/// Returns the last error once attempts are exhausted, or the first
/// non-transient error immediately.
pub async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    operation: &str,
    mut run: F,
) -> Result<T, DatabaseError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DatabaseError>>,
{
    let mut attempt = 1;
    loop {
        match run().await {
            Err(error) if attempt < config.max_attempts && is_transient_lock_error(&error) => {
                let delay = config.delay_for(attempt);
                tracing::warn!(
                    operation,
                    attempt,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    %error,
                    "database busy, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    fn busy() -> DatabaseError {
        DatabaseError::LibSql(libsql::Error::SqliteFailure(
            SQLITE_BUSY,
            "database is locked".into(),
        ))
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let config = RetryConfig {
            max_attempts: 5,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_millis(120),
        };
        assert_eq!(config.delay_for(1), Duration::from_millis(50));
        assert_eq!(config.delay_for(2), Duration::from_millis(100));
        assert_eq!(config.delay_for(3), Duration::from_millis(120));
    }

    #[test]
    fn only_lock_errors_are_transient() {
        assert!(is_transient_lock_error(&busy()));
        assert!(!is_transient_lock_error(&DatabaseError::Conflict("dup".into())));
        assert!(!is_transient_lock_error(&DatabaseError::LibSql(
            libsql::Error::SqliteFailure(19, "UNIQUE constraint failed: t.a".into())
        )));
    }

    #[tokio::test]
    async fn retries_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = with_retry(&fast(), "test", || async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(busy())
            } else {
                Ok(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = with_retry(&fast(), "test", || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(busy())
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_conflicts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = with_retry(&fast(), "test", || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(DatabaseError::Conflict("dup".into()))
        })
        .await;
        assert!(matches!(result, Err(DatabaseError::Conflict(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
