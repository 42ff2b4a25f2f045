//! Repository for the `personal_info` table.
//!
//! One record per survey (`uq_personal_info_survey`); the identity
//! tuple is globally unique (`uq_personal_info_identity`), so repeat
//! participants are rejected with a constraint violation the API layer
//! maps to 409.

use sqlx::PgPool;

use shiftsurvey_core::types::DbId;

use crate::models::personal_info::PersonalInfo;

/// Column list for `personal_info` queries.
const PERSONAL_INFO_COLUMNS: &str = "id, survey_id, name, birth_date, phone, created_at";

/// Provides CRUD operations for personal-info records.
pub struct PersonalInfoRepo;

impl PersonalInfoRepo {
    /// Insert a record for a survey. The phone must already be
    /// normalized (digits only) so the identity constraint compares
    /// consistently.
    pub async fn create(
        pool: &PgPool,
        survey_id: DbId,
        name: &str,
        birth_date: chrono::NaiveDate,
        phone: &str,
    ) -> Result<PersonalInfo, sqlx::Error> {
        let query = format!(
            "INSERT INTO personal_info (survey_id, name, birth_date, phone) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {PERSONAL_INFO_COLUMNS}"
        );
        sqlx::query_as::<_, PersonalInfo>(&query)
            .bind(survey_id)
            .bind(name)
            .bind(birth_date)
            .bind(phone)
            .fetch_one(pool)
            .await
    }

    /// Find the record linked to a survey.
    pub async fn find_by_survey(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Option<PersonalInfo>, sqlx::Error> {
        let query = format!("SELECT {PERSONAL_INFO_COLUMNS} FROM personal_info WHERE survey_id = $1");
        sqlx::query_as::<_, PersonalInfo>(&query)
            .bind(survey_id)
            .fetch_optional(pool)
            .await
    }

    /// List all records, oldest first, for incentive fulfillment.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<PersonalInfo>, sqlx::Error> {
        let query = format!("SELECT {PERSONAL_INFO_COLUMNS} FROM personal_info ORDER BY created_at");
        sqlx::query_as::<_, PersonalInfo>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete one record by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM personal_info WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every record. Used after incentive fulfillment is done.
    /// Returns the number of rows removed.
    pub async fn purge_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM personal_info")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
