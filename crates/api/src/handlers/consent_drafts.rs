//! Handlers for session-scoped consent drafts.
//!
//! The consent form is filled in over several screens; the client saves
//! progress under an opaque session key it generates itself. Drafts
//! expire after a TTL and are swept by a background job.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use shiftsurvey_core::consent::validate_signature_image;
use shiftsurvey_core::error::CoreError;
use shiftsurvey_db::autowake::with_wake;
use shiftsurvey_db::models::consent::UpsertConsentDraft;
use shiftsurvey_db::repositories::ConsentDraftRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum accepted session-key length.
const MAX_SESSION_KEY_LEN: usize = 128;

/// PUT /api/v1/consent-drafts/{session_key}
///
/// Save (or replace) the draft for a session, resetting its expiry.
pub async fn upsert(
    State(state): State<AppState>,
    Path(session_key): Path<String>,
    Json(input): Json<UpsertConsentDraft>,
) -> AppResult<impl IntoResponse> {
    validate_session_key(&session_key)?;
    for signature in &input.payload.signatures {
        validate_signature_image(signature)?;
    }

    let expires_at = Utc::now() + chrono::Duration::minutes(state.config.consent_draft_ttl_mins);

    let draft = with_wake(|| {
        ConsentDraftRepo::upsert(&state.pool, &session_key, &input.payload, expires_at)
    })
    .await?;

    Ok(Json(DataResponse { data: draft }))
}

/// GET /api/v1/consent-drafts/{session_key}
///
/// Fetch the active draft for a session. An expired draft is gone even
/// if the sweeper has not removed the row yet.
pub async fn get(
    State(state): State<AppState>,
    Path(session_key): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_session_key(&session_key)?;

    let draft = with_wake(|| ConsentDraftRepo::find_active(&state.pool, &session_key))
        .await?
        .ok_or(AppError::NotFound("Consent draft"))?;

    Ok(Json(DataResponse { data: draft }))
}

/// DELETE /api/v1/consent-drafts/{session_key}
///
/// Discard the draft for a session. Idempotent: deleting a missing
/// draft still returns 204.
pub async fn delete(
    State(state): State<AppState>,
    Path(session_key): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_session_key(&session_key)?;

    with_wake(|| ConsentDraftRepo::delete(&state.pool, &session_key)).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn validate_session_key(session_key: &str) -> Result<(), AppError> {
    if session_key.trim().is_empty() || session_key.len() > MAX_SESSION_KEY_LEN {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid session key".into(),
        )));
    }
    Ok(())
}
