//! Handlers for personal-info records (incentive contact details).
//!
//! A record is collected only on explicit consent, tied to exactly one
//! survey, and globally unique on the (name, birth date, phone) tuple
//! so repeat participants are rejected.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use shiftsurvey_core::consent::{
    normalize_phone, validate_birth_date, validate_name, validate_phone,
};
use shiftsurvey_core::error::CoreError;
use shiftsurvey_core::types::DbId;
use shiftsurvey_db::autowake::with_wake;
use shiftsurvey_db::models::personal_info::CreatePersonalInfo;
use shiftsurvey_db::repositories::{PersonalInfoRepo, SurveyRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthResearcher;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Participant endpoint
// ---------------------------------------------------------------------------

/// POST /api/v1/surveys/{id}/personal-info
///
/// Attach contact details to a survey. The phone is normalized to
/// digits before storage; a duplicate identity tuple returns 409.
pub async fn create(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    Json(input): Json<CreatePersonalInfo>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    validate_phone(&input.phone)?;
    validate_birth_date(input.birth_date)?;

    let survey = with_wake(|| SurveyRepo::find_by_id(&state.pool, survey_id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        }))?;

    let name = input.name.trim().to_string();
    let phone = normalize_phone(&input.phone);

    let record = with_wake(|| {
        PersonalInfoRepo::create(&state.pool, survey.id, &name, input.birth_date, &phone)
    })
    .await?;

    tracing::info!(survey_id, "Personal info recorded");

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/personal-info
///
/// List all records, oldest first, for incentive fulfillment.
pub async fn list(
    _auth: AuthResearcher,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let records = PersonalInfoRepo::list_all(&state.pool).await?;

    Ok(Json(DataResponse { data: records }))
}

/// DELETE /api/v1/admin/personal-info/{id}
///
/// Remove one record.
pub async fn delete(
    auth: AuthResearcher,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PersonalInfoRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PersonalInfo",
            id,
        }));
    }

    tracing::info!(
        personal_info_id = id,
        researcher_id = auth.researcher_id,
        "Personal info deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Result payload of the purge endpoint.
#[derive(Debug, Serialize)]
pub struct PurgeResult {
    pub purged: u64,
}

/// DELETE /api/v1/admin/personal-info
///
/// Remove every record, once incentive fulfillment is complete.
pub async fn purge(
    auth: AuthResearcher,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let purged = PersonalInfoRepo::purge_all(&state.pool).await?;

    tracing::info!(purged, researcher_id = auth.researcher_id, "Personal info purged");

    Ok(Json(DataResponse {
        data: PurgeResult { purged },
    }))
}
