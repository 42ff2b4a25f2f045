//! Handlers for stored consent documents.
//!
//! The survey client renders the consent PDF itself and posts it as
//! Base64 together with the raw signature images; the server validates
//! and stores it. Admins can list metadata, download a single document,
//! or pull every document in one ZIP archive.

use std::io::{Cursor, Write};

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use shiftsurvey_core::consent::{
    decode_base64_payload, validate_consent_pdf, validate_name, validate_signature_image,
};
use shiftsurvey_core::error::CoreError;
use shiftsurvey_core::types::DbId;
use shiftsurvey_db::autowake::with_wake;
use shiftsurvey_db::models::consent::CreateConsentPdf;
use shiftsurvey_db::repositories::{ConsentPdfRepo, SurveyRepo};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthResearcher;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Participant endpoint
// ---------------------------------------------------------------------------

/// POST /api/v1/surveys/{id}/consent
///
/// Store the finalized consent document for a survey. The document must
/// be a Base64 PDF within the size cap; each signature must be a valid
/// Base64 image. A second document for the same survey returns 409.
pub async fn create(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    Json(input): Json<CreateConsentPdf>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.participant_name)?;
    if input.participant_signatures.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one participant signature is required".into(),
        )));
    }
    for signature in &input.participant_signatures {
        validate_signature_image(signature)?;
    }
    if let Some(signature) = &input.researcher_signature {
        validate_signature_image(signature)?;
    }
    validate_consent_pdf(&input.pdf_base64)?;

    let survey = with_wake(|| SurveyRepo::find_by_id(&state.pool, survey_id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        }))?;

    let stored = with_wake(|| ConsentPdfRepo::create(&state.pool, survey.id, &input)).await?;

    tracing::info!(survey_id, consent_pdf_id = stored.id, "Consent document stored");

    Ok((StatusCode::CREATED, Json(DataResponse { data: stored })))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/consent-pdfs
///
/// Metadata table for stored documents, newest first. Bodies are not
/// included; use the download endpoints for those.
pub async fn list(
    _auth: AuthResearcher,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let metas = ConsentPdfRepo::list_meta(&state.pool).await?;

    Ok(Json(DataResponse { data: metas }))
}

/// GET /api/v1/admin/consent-pdfs/{id}/download
///
/// Download one consent document as a PDF attachment.
pub async fn download(
    _auth: AuthResearcher,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let pdf = ConsentPdfRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ConsentPdf",
            id,
        }))?;

    let bytes = decode_base64_payload(&pdf.pdf_base64)
        .map_err(|e| AppError::InternalError(format!("Stored consent PDF is corrupt: {e}")))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        attachment_header(&format!("consent_survey_{}.pdf", pdf.survey_id))?,
    );

    Ok((headers, bytes))
}

/// GET /api/v1/admin/consent-pdfs/export.zip
///
/// Download every stored consent document in a single ZIP archive, one
/// entry per survey. An archive with zero entries is still valid.
pub async fn export_zip(
    _auth: AuthResearcher,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let pdfs = ConsentPdfRepo::list_all(&state.pool).await?;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for pdf in &pdfs {
        let bytes = decode_base64_payload(&pdf.pdf_base64)
            .map_err(|e| AppError::InternalError(format!("Stored consent PDF is corrupt: {e}")))?;

        writer
            .start_file(format!("consent_survey_{}.pdf", pdf.survey_id), options)
            .map_err(|e| AppError::InternalError(format!("ZIP write error: {e}")))?;
        writer
            .write_all(&bytes)
            .map_err(|e| AppError::InternalError(format!("ZIP write error: {e}")))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| AppError::InternalError(format!("ZIP finalize error: {e}")))?;

    tracing::info!(documents = pdfs.len(), "Consent ZIP export generated");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/zip"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        attachment_header("consent_pdfs.zip")?,
    );

    Ok((headers, cursor.into_inner()))
}

fn attachment_header(filename: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| AppError::InternalError(format!("Invalid attachment filename: {e}")))
}
