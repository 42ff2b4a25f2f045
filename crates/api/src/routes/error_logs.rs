//! Route definitions for the admin error-log viewer.

use axum::routing::get;
use axum::Router;

use crate::handlers::error_logs;
use crate::state::AppState;

/// Admin routes mounted at `/admin/error-logs`.
///
/// ```text
/// GET    /  -> list
/// DELETE /  -> clear
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/", get(error_logs::list).delete(error_logs::clear))
}
