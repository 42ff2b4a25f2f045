//! Route definitions for per-department response caps.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::survey_limits;
use crate::state::AppState;

/// Public capacity snapshot mounted at `/departments`.
///
/// ```text
/// GET /{department}/status  -> department_status
/// ```
pub fn department_router() -> Router<AppState> {
    Router::new().route("/{department}/status", get(survey_limits::department_status))
}

/// Admin cap management mounted at `/admin/survey-limits`.
///
/// ```text
/// GET    /              -> list
/// PUT    /              -> upsert
/// DELETE /{department}  -> delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(survey_limits::list).put(survey_limits::upsert))
        .route("/{department}", delete(survey_limits::delete))
}
