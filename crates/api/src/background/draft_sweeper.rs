//! Periodic cleanup of expired consent drafts.
//!
//! Spawns a background task that deletes rows from `consent_drafts`
//! whose `expires_at` has passed. Reads already treat expired rows as
//! absent; this job keeps the table from growing unbounded. Runs on a
//! fixed interval using `tokio::time::interval`.

use std::time::Duration;

use shiftsurvey_db::repositories::ConsentDraftRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Run the expired-draft sweep loop until `cancel` is triggered.
pub async fn run(pool: PgPool, sweep_interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = sweep_interval.as_secs(),
        "Consent draft sweeper started"
    );

    let mut interval = tokio::time::interval(sweep_interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Consent draft sweeper stopping");
                break;
            }
            _ = interval.tick() => {
                match ConsentDraftRepo::delete_expired(&pool).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Consent draft sweep: removed expired drafts");
                        } else {
                            tracing::debug!("Consent draft sweep: nothing to remove");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Consent draft sweep failed");
                    }
                }
            }
        }
    }
}
