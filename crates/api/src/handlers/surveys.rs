//! Handlers for survey drafts, submission, and the admin response table.
//!
//! The participant-facing endpoints run their queries through
//! [`with_wake`] because the first request after an idle period may hit
//! a paused database instance.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use shiftsurvey_core::error::CoreError;
use shiftsurvey_core::export::{csv_row, flatten_schedule};
use shiftsurvey_core::schedule::{
    validate_off_duty_types, validate_schedule, validate_submission, validate_work_types,
    OffDutyTypeMap, ShiftTypeMap, SubmissionFields,
};
use shiftsurvey_core::types::DbId;
use shiftsurvey_db::autowake::with_wake;
use shiftsurvey_db::models::survey::{
    CreateSurvey, SubmitOutcome, Survey, SurveyListParams, SurveySummary, UpdateSurvey,
};
use shiftsurvey_db::repositories::{ConsentPdfRepo, PersonalInfoRepo, SurveyRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthResearcher;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Participant endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/surveys
///
/// Open a new draft. Any subset of fields may be present; whatever maps
/// are supplied are validated before persisting.
pub async fn create_draft(
    State(state): State<AppState>,
    Json(input): Json<CreateSurvey>,
) -> AppResult<impl IntoResponse> {
    validate_create_maps(&input, &state)?;

    let survey = with_wake(|| SurveyRepo::create(&state.pool, &input)).await?;

    tracing::info!(survey_id = survey.id, "Survey draft created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: survey })))
}

/// GET /api/v1/surveys/{id}
///
/// Fetch a draft (or submitted response) so the wizard can resume.
pub async fn get_survey(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let survey = with_wake(|| SurveyRepo::find_by_id(&state.pool, id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id,
        }))?;

    Ok(Json(DataResponse { data: survey }))
}

/// PATCH /api/v1/surveys/{id}
///
/// Update a draft in place. Omitted fields are left unchanged. A survey
/// that was already submitted returns 409.
pub async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSurvey>,
) -> AppResult<impl IntoResponse> {
    if let Some(work_types) = &input.work_types {
        validate_work_types(work_types)?;
    }
    if let Some(off_duty_types) = &input.off_duty_types {
        validate_off_duty_types(off_duty_types)?;
    }
    // The schedule must resolve against the definitive maps, which may
    // come partly from this request and partly from the stored draft.
    if input.schedule.is_some() {
        let current = with_wake(|| SurveyRepo::find_by_id(&state.pool, id))
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Survey",
                id,
            }))?;

        let work_types = input.work_types.as_ref().unwrap_or(&current.work_types.0);
        let off_duty_types = input
            .off_duty_types
            .as_ref()
            .unwrap_or(&current.off_duty_types.0);
        let schedule = input.schedule.as_ref().unwrap_or(&current.schedule.0);
        validate_schedule(
            schedule,
            work_types,
            off_duty_types,
            &state.config.survey_period,
        )?;
    }

    let updated = with_wake(|| SurveyRepo::update_draft(&state.pool, id, &input)).await?;

    match updated {
        Some(survey) => Ok(Json(DataResponse { data: survey })),
        None => {
            // Either the row is gone or it was already submitted.
            let exists = with_wake(|| SurveyRepo::find_by_id(&state.pool, id))
                .await?
                .is_some();
            if exists {
                Err(AppError::AlreadySubmitted)
            } else {
                Err(AppError::Core(CoreError::NotFound {
                    entity: "Survey",
                    id,
                }))
            }
        }
    }
}

/// POST /api/v1/surveys/{id}/submit
///
/// Finalize a draft. Validates the full response, then flips the draft
/// flag inside a transaction that also enforces the department cap.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let survey = with_wake(|| SurveyRepo::find_by_id(&state.pool, id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id,
        }))?;

    validate_work_types(&survey.work_types.0)?;
    validate_off_duty_types(&survey.off_duty_types.0)?;
    validate_schedule(
        &survey.schedule.0,
        &survey.work_types.0,
        &survey.off_duty_types.0,
        &state.config.survey_period,
    )?;

    let fields = SubmissionFields {
        gender: survey.gender.as_deref(),
        birth_year: survey.birth_year,
        education: survey.education.as_deref(),
        marital_status: survey.marital_status.as_deref(),
        position: survey.position.as_deref(),
        career_years: survey.career_years,
        institution_type: survey.institution_type.as_deref(),
        department: survey.department.as_deref(),
    };
    validate_submission(&fields, survey.schedule.0.len())?;

    let outcome = with_wake(|| SurveyRepo::submit(&state.pool, id)).await?;

    match outcome {
        SubmitOutcome::Submitted(survey) => {
            tracing::info!(
                survey_id = survey.id,
                department = survey.department.as_deref().unwrap_or(""),
                "Survey submitted"
            );
            Ok(Json(DataResponse { data: *survey }))
        }
        SubmitOutcome::AlreadySubmitted => Err(AppError::AlreadySubmitted),
        SubmitOutcome::DepartmentFull => Err(AppError::DepartmentFull),
        SubmitOutcome::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id,
        })),
    }
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// Payload of the admin response table: one page plus the total count.
#[derive(Debug, Serialize)]
pub struct SurveyPage {
    pub items: Vec<SurveySummary>,
    pub total: i64,
}

/// GET /api/v1/admin/surveys
///
/// List responses for the admin table. Submitted-only by default;
/// `include_drafts=true` widens the view, `department=` filters.
pub async fn list_surveys(
    _auth: AuthResearcher,
    State(state): State<AppState>,
    Query(params): Query<SurveyListParams>,
) -> AppResult<impl IntoResponse> {
    if params.limit.is_some_and(|l| l < 0) || params.offset.is_some_and(|o| o < 0) {
        return Err(AppError::BadRequest(
            "limit and offset must be non-negative".to_string(),
        ));
    }

    let items = SurveyRepo::list(&state.pool, &params).await?;
    let total = SurveyRepo::count(&state.pool, &params).await?;

    Ok(Json(DataResponse {
        data: SurveyPage { items, total },
    }))
}

/// Full response detail for the admin view: the survey row plus
/// presence flags for its linked records.
#[derive(Debug, Serialize)]
pub struct SurveyDetail {
    #[serde(flatten)]
    pub survey: Survey,
    pub has_personal_info: bool,
    pub has_consent_pdf: bool,
}

/// GET /api/v1/admin/surveys/{id}
///
/// Full response detail, including the three JSON maps and whether
/// personal info and a consent document are attached.
pub async fn get_survey_admin(
    _auth: AuthResearcher,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let survey = SurveyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id,
        }))?;

    let has_personal_info = PersonalInfoRepo::find_by_survey(&state.pool, id)
        .await?
        .is_some();
    let has_consent_pdf = ConsentPdfRepo::find_by_survey(&state.pool, id)
        .await?
        .is_some();

    Ok(Json(DataResponse {
        data: SurveyDetail {
            survey,
            has_personal_info,
            has_consent_pdf,
        },
    }))
}

/// DELETE /api/v1/admin/surveys/{id}
///
/// Remove a response. Linked personal info and consent documents go
/// with it (cascade).
pub async fn delete_survey(
    auth: AuthResearcher,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = SurveyRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id,
        }));
    }

    tracing::info!(survey_id = id, researcher_id = auth.researcher_id, "Survey deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Column headers of the CSV export, in output order.
const CSV_HEADERS: [&str; 13] = [
    "id",
    "submitted_at",
    "gender",
    "birth_year",
    "education",
    "marital_status",
    "position",
    "career_years",
    "institution_type",
    "department",
    "work_types",
    "off_duty_types",
    "schedule",
];

/// GET /api/v1/admin/surveys/export.csv
///
/// Download all submitted responses as a CSV attachment.
pub async fn export_csv(
    _auth: AuthResearcher,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let surveys = SurveyRepo::list_submitted(&state.pool).await?;

    let mut csv = String::new();
    csv.push_str(&csv_row(CSV_HEADERS));
    csv.push('\n');
    for survey in &surveys {
        csv.push_str(&survey_csv_row(survey));
        csv.push('\n');
    }

    tracing::info!(rows = surveys.len(), "Survey CSV export generated");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"surveys.csv\"",
            ),
        ],
        csv,
    ))
}

/// Encode one survey as a CSV row matching [`CSV_HEADERS`].
fn survey_csv_row(survey: &Survey) -> String {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    let num = |v: Option<i32>| v.map(|n| n.to_string()).unwrap_or_default();

    csv_row([
        survey.id.to_string(),
        survey
            .submitted_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
        opt(&survey.gender),
        num(survey.birth_year),
        opt(&survey.education),
        opt(&survey.marital_status),
        opt(&survey.position),
        num(survey.career_years),
        opt(&survey.institution_type),
        opt(&survey.department),
        flatten_work_types(&survey.work_types.0),
        flatten_off_duty_types(&survey.off_duty_types.0),
        flatten_schedule(&survey.schedule.0),
    ])
}

/// Flatten work-type definitions into `id=name(start-end); ...`.
fn flatten_work_types(work_types: &ShiftTypeMap) -> String {
    work_types
        .iter()
        .map(|(id, def)| format!("{id}={}({}-{})", def.name, def.start_time, def.end_time))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Flatten off-duty-type definitions into `id=name; ...`.
fn flatten_off_duty_types(off_duty_types: &OffDutyTypeMap) -> String {
    off_duty_types
        .iter()
        .map(|(id, def)| format!("{id}={}", def.name))
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Validation plumbing
// ---------------------------------------------------------------------------

/// Validate whatever maps a draft-create request carries. A schedule in
/// the initial request can only reference types defined in the same
/// request, since no stored maps exist yet.
fn validate_create_maps(input: &CreateSurvey, state: &AppState) -> AppResult<()> {
    if let Some(work_types) = &input.work_types {
        validate_work_types(work_types)?;
    }
    if let Some(off_duty_types) = &input.off_duty_types {
        validate_off_duty_types(off_duty_types)?;
    }
    if let Some(schedule) = &input.schedule {
        let empty_shifts = ShiftTypeMap::new();
        let empty_off = OffDutyTypeMap::new();
        validate_schedule(
            schedule,
            input.work_types.as_ref().unwrap_or(&empty_shifts),
            input.off_duty_types.as_ref().unwrap_or(&empty_off),
            &state.config.survey_period,
        )?;
    }
    Ok(())
}
