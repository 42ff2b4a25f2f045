//! Route definitions for consent drafts and stored consent documents.

use axum::routing::get;
use axum::Router;

use crate::handlers::{consent_drafts, consent_pdfs};
use crate::state::AppState;

/// Session-scoped draft routes mounted at `/consent-drafts`.
///
/// ```text
/// GET    /{session_key}  -> get
/// PUT    /{session_key}  -> upsert
/// DELETE /{session_key}  -> delete
/// ```
pub fn drafts_router() -> Router<AppState> {
    Router::new().route(
        "/{session_key}",
        get(consent_drafts::get)
            .put(consent_drafts::upsert)
            .delete(consent_drafts::delete),
    )
}

/// Admin consent-document routes mounted at `/admin/consent-pdfs`.
///
/// ```text
/// GET /                -> list (metadata only)
/// GET /export.zip      -> export_zip
/// GET /{id}/download   -> download
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(consent_pdfs::list))
        .route("/export.zip", get(consent_pdfs::export_zip))
        .route("/{id}/download", get(consent_pdfs::download))
}
