//! Consent PDF and consent draft models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shiftsurvey_core::consent::ConsentDraftPayload;
use shiftsurvey_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Consent PDFs
// ---------------------------------------------------------------------------

/// Full row from the `consent_pdfs` table, including the stored
/// Base64 document. Fetch [`ConsentPdfMeta`] instead when the document
/// body is not needed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConsentPdf {
    pub id: DbId,
    pub survey_id: DbId,
    pub participant_name: String,
    /// Participant signature images (Base64), in form order.
    pub participant_signatures: Json<Vec<String>>,
    /// Researcher signature image (Base64) stamped onto the document.
    pub researcher_signature: Option<String>,
    pub participant_signed_on: NaiveDate,
    pub researcher_signed_on: Option<NaiveDate>,
    /// The client-rendered consent document, Base64-encoded.
    pub pdf_base64: String,
    pub created_at: Timestamp,
}

/// Metadata row for the admin consent-PDF table (no document body).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConsentPdfMeta {
    pub id: DbId,
    pub survey_id: DbId,
    pub participant_name: String,
    pub participant_signed_on: NaiveDate,
    pub researcher_signed_on: Option<NaiveDate>,
    pub created_at: Timestamp,
}

/// DTO for storing a consent PDF. The survey id comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConsentPdf {
    pub participant_name: String,
    pub participant_signatures: Vec<String>,
    pub researcher_signature: Option<String>,
    pub participant_signed_on: NaiveDate,
    pub researcher_signed_on: Option<NaiveDate>,
    pub pdf_base64: String,
}

// ---------------------------------------------------------------------------
// Consent drafts
// ---------------------------------------------------------------------------

/// Row from the `consent_drafts` table: session-scoped signature/name
/// data held until the client finalizes the PDF.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConsentDraft {
    pub id: DbId,
    pub session_key: String,
    pub payload: Json<ConsentDraftPayload>,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a consent draft by session key.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertConsentDraft {
    pub payload: ConsentDraftPayload,
}
