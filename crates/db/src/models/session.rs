//! Refresh-token session model and DTO.

use shiftsurvey_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Row from the `sessions` table. Only the SHA-256 hash of the refresh
/// token is stored server-side.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub researcher_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for persisting a new session.
#[derive(Debug)]
pub struct CreateSession {
    pub researcher_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
