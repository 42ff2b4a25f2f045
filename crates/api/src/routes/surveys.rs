//! Route definitions for survey responses.
//!
//! Two routers are provided:
//! - `router()` for the participant-facing wizard, mounted at `/surveys`
//! - `admin_router()` for the response table, mounted at `/admin/surveys`

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{consent_pdfs, personal_info, surveys};
use crate::state::AppState;

/// Participant-facing survey routes mounted at `/surveys`.
///
/// ```text
/// POST  /                    -> create_draft
/// GET   /{id}                -> get_survey
/// PATCH /{id}                -> update_draft
/// POST  /{id}/submit         -> submit
/// POST  /{id}/personal-info  -> personal_info::create
/// POST  /{id}/consent        -> consent_pdfs::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(surveys::create_draft))
        .route(
            "/{id}",
            get(surveys::get_survey).patch(surveys::update_draft),
        )
        .route("/{id}/submit", post(surveys::submit))
        .route("/{id}/personal-info", post(personal_info::create))
        .route("/{id}/consent", post(consent_pdfs::create))
}

/// Admin response-table routes mounted at `/admin/surveys`.
///
/// ```text
/// GET    /            -> list_surveys
/// GET    /export.csv  -> export_csv
/// GET    /{id}        -> get_survey_admin
/// DELETE /{id}        -> delete_survey
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(surveys::list_surveys))
        .route("/export.csv", get(surveys::export_csv))
        .route(
            "/{id}",
            get(surveys::get_survey_admin).delete(surveys::delete_survey),
        )
}
