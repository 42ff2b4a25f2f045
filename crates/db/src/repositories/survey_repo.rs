//! Repository for the `surveys` table.
//!
//! Drafts are ordinary rows with `is_draft = TRUE`; submission flips the
//! flag inside a transaction that also enforces the per-department cap.

use sqlx::PgPool;

use shiftsurvey_core::types::DbId;
use sqlx::types::Json;

use crate::models::survey::{
    CreateSurvey, SubmitOutcome, Survey, SurveyListParams, SurveySummary, UpdateSurvey,
};

/// Column list for `surveys` queries.
const SURVEY_COLUMNS: &str = "\
    id, gender, birth_year, education, marital_status, position, career_years, \
    institution_type, department, work_types, off_duty_types, schedule, \
    is_draft, submitted_at, created_at, updated_at";

/// Default page size for the admin list.
const DEFAULT_LIMIT: i64 = 100;

/// Maximum page size for the admin list.
const MAX_LIMIT: i64 = 500;

/// Provides CRUD and submission operations for survey responses.
pub struct SurveyRepo;

impl SurveyRepo {
    /// Insert a new draft with whatever subset of fields the wizard has
    /// collected so far.
    pub async fn create(pool: &PgPool, input: &CreateSurvey) -> Result<Survey, sqlx::Error> {
        let query = format!(
            "INSERT INTO surveys \
                 (gender, birth_year, education, marital_status, position, career_years, \
                  institution_type, department, work_types, off_duty_types, schedule) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, \
                     COALESCE($9, '{{}}'::jsonb), \
                     COALESCE($10, '{{}}'::jsonb), \
                     COALESCE($11, '{{}}'::jsonb)) \
             RETURNING {SURVEY_COLUMNS}"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(&input.gender)
            .bind(input.birth_year)
            .bind(&input.education)
            .bind(&input.marital_status)
            .bind(&input.position)
            .bind(input.career_years)
            .bind(&input.institution_type)
            .bind(&input.department)
            .bind(input.work_types.as_ref().map(Json))
            .bind(input.off_duty_types.as_ref().map(Json))
            .bind(input.schedule.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }

    /// Find a survey by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!("SELECT {SURVEY_COLUMNS} FROM surveys WHERE id = $1");
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a draft. Omitted fields keep their current value.
    ///
    /// Returns `None` if the survey does not exist or is already
    /// submitted; callers disambiguate via [`Self::find_by_id`].
    pub async fn update_draft(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSurvey,
    ) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!(
            "UPDATE surveys SET \
                 gender = COALESCE($2, gender), \
                 birth_year = COALESCE($3, birth_year), \
                 education = COALESCE($4, education), \
                 marital_status = COALESCE($5, marital_status), \
                 position = COALESCE($6, position), \
                 career_years = COALESCE($7, career_years), \
                 institution_type = COALESCE($8, institution_type), \
                 department = COALESCE($9, department), \
                 work_types = COALESCE($10, work_types), \
                 off_duty_types = COALESCE($11, off_duty_types), \
                 schedule = COALESCE($12, schedule), \
                 updated_at = now() \
             WHERE id = $1 AND is_draft \
             RETURNING {SURVEY_COLUMNS}"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .bind(&input.gender)
            .bind(input.birth_year)
            .bind(&input.education)
            .bind(&input.marital_status)
            .bind(&input.position)
            .bind(input.career_years)
            .bind(&input.institution_type)
            .bind(&input.department)
            .bind(input.work_types.as_ref().map(Json))
            .bind(input.off_duty_types.as_ref().map(Json))
            .bind(input.schedule.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Mark a draft as submitted, enforcing the department cap.
    ///
    /// Locks the department's `survey_limits` row (`FOR UPDATE`) so two
    /// concurrent submits near the cap serialize; the second sees the
    /// first one's count. A department without a limit row is unlimited.
    pub async fn submit(pool: &PgPool, id: DbId) -> Result<SubmitOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let row: Option<(bool, Option<String>)> =
            sqlx::query_as("SELECT is_draft, department FROM surveys WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((is_draft, department)) = row else {
            return Ok(SubmitOutcome::NotFound);
        };
        if !is_draft {
            return Ok(SubmitOutcome::AlreadySubmitted);
        }

        if let Some(dept) = department.as_deref() {
            let cap: Option<i32> = sqlx::query_scalar(
                "SELECT max_responses FROM survey_limits WHERE department = $1 FOR UPDATE",
            )
            .bind(dept)
            .fetch_optional(&mut *tx)
            .await?;

            if let Some(cap) = cap {
                let used: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM surveys WHERE department = $1 AND NOT is_draft",
                )
                .bind(dept)
                .fetch_one(&mut *tx)
                .await?;

                if used >= i64::from(cap) {
                    tx.rollback().await?;
                    return Ok(SubmitOutcome::DepartmentFull);
                }
            }
        }

        let query = format!(
            "UPDATE surveys SET is_draft = FALSE, submitted_at = now(), updated_at = now() \
             WHERE id = $1 \
             RETURNING {SURVEY_COLUMNS}"
        );
        let survey = sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(SubmitOutcome::Submitted(Box::new(survey)))
    }

    /// List summaries for the admin table, newest first.
    pub async fn list(
        pool: &PgPool,
        params: &SurveyListParams,
    ) -> Result<Vec<SurveySummary>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);
        let include_drafts = params.include_drafts.unwrap_or(false);

        sqlx::query_as::<_, SurveySummary>(
            "SELECT s.id, s.department, s.position, s.institution_type, \
                    s.is_draft, s.submitted_at, s.created_at, \
                    EXISTS(SELECT 1 FROM personal_info p WHERE p.survey_id = s.id) AS has_personal_info, \
                    EXISTS(SELECT 1 FROM consent_pdfs c WHERE c.survey_id = s.id) AS has_consent_pdf \
             FROM surveys s \
             WHERE ($1::text IS NULL OR s.department = $1) \
               AND ($2::bool OR NOT s.is_draft) \
             ORDER BY s.created_at DESC \
             LIMIT $3 OFFSET $4",
        )
        .bind(&params.department)
        .bind(include_drafts)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Total row count with the same filters as [`Self::list`].
    pub async fn count(pool: &PgPool, params: &SurveyListParams) -> Result<i64, sqlx::Error> {
        let include_drafts = params.include_drafts.unwrap_or(false);

        sqlx::query_scalar(
            "SELECT COUNT(*) FROM surveys s \
             WHERE ($1::text IS NULL OR s.department = $1) \
               AND ($2::bool OR NOT s.is_draft)",
        )
        .bind(&params.department)
        .bind(include_drafts)
        .fetch_one(pool)
        .await
    }

    /// All submitted responses, oldest first, for the CSV export.
    pub async fn list_submitted(pool: &PgPool) -> Result<Vec<Survey>, sqlx::Error> {
        let query = format!(
            "SELECT {SURVEY_COLUMNS} FROM surveys \
             WHERE NOT is_draft \
             ORDER BY submitted_at"
        );
        sqlx::query_as::<_, Survey>(&query).fetch_all(pool).await
    }

    /// Delete a survey. Cascade deletes linked personal info and consent
    /// records. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM surveys WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
