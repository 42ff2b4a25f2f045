//! AutoWake: retry wrapper for a paused serverless Postgres tier.
//!
//! The hosted database suspends after a period of inactivity; the first
//! query against a suspended instance fails with a connection-level
//! error (or `57P03` while the instance is coming back up). Re-issuing
//! the same query after a short delay succeeds once the instance is
//! awake. [`with_wake`] detects that narrow class of errors and retries;
//! anything else propagates immediately.

use std::future::Future;
use std::time::Duration;

/// Total attempts (the initial call plus retries).
pub const WAKE_MAX_ATTEMPTS: u32 = 4;

/// Delay between attempts while the instance wakes.
pub const WAKE_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Whether an error looks like a paused/waking database instance.
///
/// Matches connection-level failures (refused, reset, closed), pool
/// acquisition timeouts, and the Postgres `57P03` / `53300` startup
/// codes. Query-level errors (constraint violations, bad SQL, row not
/// found) never match.
pub fn is_wake_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => true,
        sqlx::Error::Database(db_err) => {
            matches!(db_err.code().as_deref(), Some("57P03") | Some("53300"))
        }
        other => {
            let msg = other.to_string().to_ascii_lowercase();
            msg.contains("connection refused")
                || msg.contains("connection reset")
                || msg.contains("connection closed")
                || msg.contains("starting up")
        }
    }
}

/// Run a query closure, retrying on wake-class errors.
pub async fn with_wake<T, F, Fut>(op: F) -> Result<T, sqlx::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    with_wake_config(op, WAKE_MAX_ATTEMPTS, WAKE_RETRY_DELAY).await
}

/// [`with_wake`] with explicit attempt count and delay.
pub async fn with_wake_config<T, F, Fut>(
    op: F,
    max_attempts: u32,
    delay: Duration,
) -> Result<T, sqlx::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if is_wake_error(&err) && attempt < max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %err,
                    "Database appears to be waking, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn wake_error() -> sqlx::Error {
        sqlx::Error::PoolTimedOut
    }

    fn fatal_error() -> sqlx::Error {
        sqlx::Error::RowNotFound
    }

    #[tokio::test]
    async fn succeeds_after_wake_errors() {
        let calls = AtomicU32::new(0);

        let result = with_wake_config(
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(wake_error())
                } else {
                    Ok(42u32)
                }
            },
            4,
            Duration::from_millis(1),
        )
        .await;

        assert_matches!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_wake_config(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(wake_error())
            },
            3,
            Duration::from_millis(1),
        )
        .await;

        assert_matches!(result, Err(sqlx::Error::PoolTimedOut));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_wake_errors_propagate_immediately() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_wake_config(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(fatal_error())
            },
            4,
            Duration::from_millis(1),
        )
        .await;

        assert_matches!(result, Err(sqlx::Error::RowNotFound));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn immediate_success_makes_one_call() {
        let calls = AtomicU32::new(0);

        let result = with_wake_config(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("ok")
            },
            4,
            Duration::from_millis(1),
        )
        .await;

        assert_matches!(result, Ok("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn wake_error_classification() {
        assert!(is_wake_error(&sqlx::Error::PoolTimedOut));
        assert!(is_wake_error(&sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ))));
        assert!(!is_wake_error(&sqlx::Error::RowNotFound));
    }
}
