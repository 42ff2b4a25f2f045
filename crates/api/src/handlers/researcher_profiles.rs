//! Handlers for researcher profiles.
//!
//! A profile carries the display name and signature image the survey
//! client overlays onto the consent document. The public endpoint
//! serves the default profile; admins manage the full set.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use shiftsurvey_core::consent::{validate_name, validate_signature_image};
use shiftsurvey_core::error::CoreError;
use shiftsurvey_core::types::DbId;
use shiftsurvey_db::autowake::with_wake;
use shiftsurvey_db::models::researcher::{CreateResearcherProfile, UpdateResearcherProfile};
use shiftsurvey_db::repositories::ResearcherProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthResearcher;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Participant endpoint
// ---------------------------------------------------------------------------

/// GET /api/v1/researcher-profile
///
/// The default profile, for the consent form. Falls back to the most
/// recent profile when none is marked default.
pub async fn get_default(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let profile = with_wake(|| ResearcherProfileRepo::find_default(&state.pool))
        .await?
        .ok_or(AppError::NotFound("Researcher profile"))?;

    Ok(Json(DataResponse { data: profile }))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/researcher-profiles
///
/// List all profiles, default first.
pub async fn list(
    _auth: AuthResearcher,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profiles = ResearcherProfileRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: profiles }))
}

/// POST /api/v1/admin/researcher-profiles
///
/// Create a profile. Marking it default clears the previous default.
pub async fn create(
    auth: AuthResearcher,
    State(state): State<AppState>,
    Json(input): Json<CreateResearcherProfile>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.display_name)?;
    validate_signature_image(&input.signature_image)?;

    let profile = ResearcherProfileRepo::create(&state.pool, &input).await?;

    tracing::info!(
        profile_id = profile.id,
        researcher_id = auth.researcher_id,
        "Researcher profile created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

/// PUT /api/v1/admin/researcher-profiles/{id}
///
/// Update a profile. Omitted fields are left unchanged.
pub async fn update(
    auth: AuthResearcher,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateResearcherProfile>,
) -> AppResult<impl IntoResponse> {
    if let Some(display_name) = &input.display_name {
        validate_name(display_name)?;
    }
    if let Some(signature_image) = &input.signature_image {
        validate_signature_image(signature_image)?;
    }

    let profile = ResearcherProfileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ResearcherProfile",
            id,
        }))?;

    tracing::info!(
        profile_id = id,
        researcher_id = auth.researcher_id,
        "Researcher profile updated"
    );

    Ok(Json(DataResponse { data: profile }))
}

/// DELETE /api/v1/admin/researcher-profiles/{id}
pub async fn delete(
    auth: AuthResearcher,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ResearcherProfileRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ResearcherProfile",
            id,
        }));
    }

    tracing::info!(
        profile_id = id,
        researcher_id = auth.researcher_id,
        "Researcher profile deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
