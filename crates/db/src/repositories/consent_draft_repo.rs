//! Repository for the `consent_drafts` table.
//!
//! Drafts are keyed by an opaque session key chosen by the client and
//! expire after a configurable TTL; the background sweeper removes
//! expired rows, and reads treat expired-but-unswept rows as absent.

use sqlx::types::Json;
use sqlx::PgPool;

use shiftsurvey_core::consent::ConsentDraftPayload;
use shiftsurvey_core::types::Timestamp;

use crate::models::consent::ConsentDraft;

/// Column list for `consent_drafts` queries.
const CONSENT_DRAFT_COLUMNS: &str =
    "id, session_key, payload, expires_at, created_at, updated_at";

/// Provides persistence for session-scoped consent drafts.
pub struct ConsentDraftRepo;

impl ConsentDraftRepo {
    /// Insert or replace the draft for a session key, resetting its
    /// expiry.
    pub async fn upsert(
        pool: &PgPool,
        session_key: &str,
        payload: &ConsentDraftPayload,
        expires_at: Timestamp,
    ) -> Result<ConsentDraft, sqlx::Error> {
        let query = format!(
            "INSERT INTO consent_drafts (session_key, payload, expires_at) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (session_key) DO UPDATE SET \
                 payload = EXCLUDED.payload, \
                 expires_at = EXCLUDED.expires_at, \
                 updated_at = now() \
             RETURNING {CONSENT_DRAFT_COLUMNS}"
        );
        sqlx::query_as::<_, ConsentDraft>(&query)
            .bind(session_key)
            .bind(Json(payload))
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a non-expired draft by session key.
    pub async fn find_active(
        pool: &PgPool,
        session_key: &str,
    ) -> Result<Option<ConsentDraft>, sqlx::Error> {
        let query = format!(
            "SELECT {CONSENT_DRAFT_COLUMNS} FROM consent_drafts \
             WHERE session_key = $1 AND expires_at > now()"
        );
        sqlx::query_as::<_, ConsentDraft>(&query)
            .bind(session_key)
            .fetch_optional(pool)
            .await
    }

    /// Delete the draft for a session key. Returns `true` if a row was
    /// deleted.
    pub async fn delete(pool: &PgPool, session_key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM consent_drafts WHERE session_key = $1")
            .bind(session_key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every expired draft. Returns the number of rows removed.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM consent_drafts WHERE expires_at <= now()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
