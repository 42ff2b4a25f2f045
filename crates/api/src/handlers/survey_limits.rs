//! Handlers for per-department response caps.
//!
//! Admins configure caps; the public status endpoint lets the wizard
//! tell participants up front when their department is full. The
//! authoritative check still happens inside the submit transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use shiftsurvey_core::error::CoreError;
use shiftsurvey_db::autowake::with_wake;
use shiftsurvey_db::models::survey_limit::UpsertSurveyLimit;
use shiftsurvey_db::repositories::SurveyLimitRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthResearcher;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Participant endpoint
// ---------------------------------------------------------------------------

/// GET /api/v1/departments/{department}/status
///
/// Capacity snapshot for one department: configured cap (if any),
/// submitted count, and whether a new submission would be accepted.
/// A department without a cap row is unlimited.
pub async fn department_status(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> AppResult<impl IntoResponse> {
    let status = with_wake(|| SurveyLimitRepo::department_status(&state.pool, &department)).await?;

    Ok(Json(DataResponse { data: status }))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/survey-limits
///
/// List all configured caps, alphabetically by department.
pub async fn list(
    _auth: AuthResearcher,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let limits = SurveyLimitRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: limits }))
}

/// PUT /api/v1/admin/survey-limits
///
/// Create or replace the cap for a department. Lowering a cap below
/// current usage never removes existing submissions; it only stops new
/// ones.
pub async fn upsert(
    auth: AuthResearcher,
    State(state): State<AppState>,
    Json(input): Json<UpsertSurveyLimit>,
) -> AppResult<impl IntoResponse> {
    if input.department.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Department must not be empty".into(),
        )));
    }
    if input.max_responses < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "max_responses must not be negative".into(),
        )));
    }

    let limit = SurveyLimitRepo::upsert(&state.pool, &input).await?;

    tracing::info!(
        department = %limit.department,
        max_responses = limit.max_responses,
        researcher_id = auth.researcher_id,
        "Survey limit set"
    );

    Ok(Json(DataResponse { data: limit }))
}

/// DELETE /api/v1/admin/survey-limits/{department}
///
/// Remove the cap for a department (back to unlimited).
pub async fn delete(
    auth: AuthResearcher,
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = SurveyLimitRepo::delete(&state.pool, &department).await?;

    if !deleted {
        return Err(AppError::NotFound("Survey limit"));
    }

    tracing::info!(
        department = %department,
        researcher_id = auth.researcher_id,
        "Survey limit removed"
    );

    Ok(StatusCode::NO_CONTENT)
}
