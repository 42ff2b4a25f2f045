//! Route definitions for admin personal-info management.
//!
//! The participant-facing create endpoint lives under `/surveys` (see
//! [`crate::routes::surveys`]).

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::personal_info;
use crate::state::AppState;

/// Admin routes mounted at `/admin/personal-info`.
///
/// ```text
/// GET    /      -> list
/// DELETE /      -> purge (all records)
/// DELETE /{id}  -> delete (one record)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(personal_info::list).delete(personal_info::purge))
        .route("/{id}", delete(personal_info::delete))
}
