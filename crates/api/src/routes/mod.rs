pub mod auth;
pub mod consent;
pub mod error_logs;
pub mod health;
pub mod limits;
pub mod personal_info;
pub mod profiles;
pub mod surveys;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                               login (public)
/// /auth/refresh                             refresh (public)
/// /auth/logout                              logout (requires auth)
///
/// /surveys                                  create draft (POST)
/// /surveys/{id}                             get, update draft (GET, PATCH)
/// /surveys/{id}/submit                      finalize (POST)
/// /surveys/{id}/personal-info               attach contact details (POST)
/// /surveys/{id}/consent                     store consent PDF (POST)
///
/// /departments/{department}/status          cap snapshot (GET)
///
/// /consent-drafts/{session_key}             get, save, discard (GET, PUT, DELETE)
///
/// /researcher-profile                       default profile for the consent form (GET)
///
/// /admin/surveys                            list responses (GET)
/// /admin/surveys/export.csv                 CSV export (GET)
/// /admin/surveys/{id}                       detail, delete (GET, DELETE)
///
/// /admin/consent-pdfs                       metadata table (GET)
/// /admin/consent-pdfs/export.zip            batch ZIP export (GET)
/// /admin/consent-pdfs/{id}/download         single PDF download (GET)
///
/// /admin/personal-info                      list, purge all (GET, DELETE)
/// /admin/personal-info/{id}                 delete one (DELETE)
///
/// /admin/survey-limits                      list, upsert (GET, PUT)
/// /admin/survey-limits/{department}         delete (DELETE)
///
/// /admin/researcher-profiles                list, create (GET, POST)
/// /admin/researcher-profiles/{id}           update, delete (PUT, DELETE)
///
/// /admin/error-logs                         list, clear (GET, DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Participant-facing survey wizard.
        .nest("/surveys", surveys::router())
        // Department capacity snapshot for the wizard.
        .nest("/departments", limits::department_router())
        // Session-scoped consent drafts.
        .nest("/consent-drafts", consent::drafts_router())
        // Default researcher profile for the consent form.
        .nest("/researcher-profile", profiles::public_router())
        // Admin response table and exports.
        .nest("/admin/surveys", surveys::admin_router())
        .nest("/admin/consent-pdfs", consent::admin_router())
        .nest("/admin/personal-info", personal_info::admin_router())
        .nest("/admin/survey-limits", limits::admin_router())
        .nest("/admin/researcher-profiles", profiles::admin_router())
        .nest("/admin/error-logs", error_logs::admin_router())
}
