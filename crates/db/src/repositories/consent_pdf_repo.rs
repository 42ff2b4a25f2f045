//! Repository for the `consent_pdfs` table.

use sqlx::types::Json;
use sqlx::PgPool;

use shiftsurvey_core::types::DbId;

use crate::models::consent::{ConsentPdf, ConsentPdfMeta, CreateConsentPdf};

/// Column list for full `consent_pdfs` rows.
const CONSENT_PDF_COLUMNS: &str = "\
    id, survey_id, participant_name, participant_signatures, researcher_signature, \
    participant_signed_on, researcher_signed_on, pdf_base64, created_at";

/// Column list for metadata rows (no document body).
const CONSENT_PDF_META_COLUMNS: &str = "\
    id, survey_id, participant_name, participant_signed_on, researcher_signed_on, created_at";

/// Provides persistence for stored consent documents.
pub struct ConsentPdfRepo;

impl ConsentPdfRepo {
    /// Store a consent PDF for a survey. A second document for the same
    /// survey violates `uq_consent_pdfs_survey`.
    pub async fn create(
        pool: &PgPool,
        survey_id: DbId,
        input: &CreateConsentPdf,
    ) -> Result<ConsentPdf, sqlx::Error> {
        let query = format!(
            "INSERT INTO consent_pdfs \
                 (survey_id, participant_name, participant_signatures, researcher_signature, \
                  participant_signed_on, researcher_signed_on, pdf_base64) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {CONSENT_PDF_COLUMNS}"
        );
        sqlx::query_as::<_, ConsentPdf>(&query)
            .bind(survey_id)
            .bind(&input.participant_name)
            .bind(Json(&input.participant_signatures))
            .bind(&input.researcher_signature)
            .bind(input.participant_signed_on)
            .bind(input.researcher_signed_on)
            .bind(&input.pdf_base64)
            .fetch_one(pool)
            .await
    }

    /// Find a consent PDF by its own ID (includes the document body).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ConsentPdf>, sqlx::Error> {
        let query = format!("SELECT {CONSENT_PDF_COLUMNS} FROM consent_pdfs WHERE id = $1");
        sqlx::query_as::<_, ConsentPdf>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the consent PDF linked to a survey.
    pub async fn find_by_survey(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Option<ConsentPdf>, sqlx::Error> {
        let query = format!("SELECT {CONSENT_PDF_COLUMNS} FROM consent_pdfs WHERE survey_id = $1");
        sqlx::query_as::<_, ConsentPdf>(&query)
            .bind(survey_id)
            .fetch_optional(pool)
            .await
    }

    /// List metadata for the admin table, newest first.
    pub async fn list_meta(pool: &PgPool) -> Result<Vec<ConsentPdfMeta>, sqlx::Error> {
        let query = format!(
            "SELECT {CONSENT_PDF_META_COLUMNS} FROM consent_pdfs ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ConsentPdfMeta>(&query)
            .fetch_all(pool)
            .await
    }

    /// All stored documents, oldest first, for the batch ZIP export.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ConsentPdf>, sqlx::Error> {
        let query = format!("SELECT {CONSENT_PDF_COLUMNS} FROM consent_pdfs ORDER BY created_at");
        sqlx::query_as::<_, ConsentPdf>(&query).fetch_all(pool).await
    }
}
