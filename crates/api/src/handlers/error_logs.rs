//! Handlers for the admin error-log viewer.
//!
//! The log is an in-memory ring buffer; it survives only for the
//! process lifetime and loses the oldest entries first.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthResearcher;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default number of entries returned by the viewer.
const DEFAULT_LIMIT: usize = 100;

/// Query parameters for `GET /admin/error-logs`.
#[derive(Debug, Deserialize)]
pub struct ErrorLogParams {
    pub limit: Option<usize>,
}

/// GET /api/v1/admin/error-logs
///
/// Most recent error events, newest first.
pub async fn list(
    _auth: AuthResearcher,
    State(state): State<AppState>,
    Query(params): Query<ErrorLogParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let entries = state.error_log.recent(limit);

    Ok(Json(DataResponse { data: entries }))
}

/// DELETE /api/v1/admin/error-logs
///
/// Discard all recorded entries.
pub async fn clear(
    auth: AuthResearcher,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    state.error_log.clear();

    tracing::info!(researcher_id = auth.researcher_id, "Error log cleared");

    Ok(StatusCode::NO_CONTENT)
}
