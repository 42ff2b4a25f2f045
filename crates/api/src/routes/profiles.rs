//! Route definitions for researcher profiles.

use axum::routing::get;
use axum::Router;

use crate::handlers::researcher_profiles;
use crate::state::AppState;

/// Public default-profile route mounted at `/researcher-profile`.
///
/// ```text
/// GET /  -> get_default
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(researcher_profiles::get_default))
}

/// Admin profile management mounted at `/admin/researcher-profiles`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(researcher_profiles::list).post(researcher_profiles::create),
        )
        .route(
            "/{id}",
            axum::routing::put(researcher_profiles::update).delete(researcher_profiles::delete),
        )
}
