//! Repository for the `survey_limits` table.

use sqlx::PgPool;

use crate::models::survey_limit::{DepartmentStatus, SurveyLimit, UpsertSurveyLimit};

/// Column list for `survey_limits` queries.
const SURVEY_LIMIT_COLUMNS: &str = "id, department, max_responses, created_at, updated_at";

/// Provides cap configuration and usage checks per department.
pub struct SurveyLimitRepo;

impl SurveyLimitRepo {
    /// Create or replace the cap for a department.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertSurveyLimit,
    ) -> Result<SurveyLimit, sqlx::Error> {
        let query = format!(
            "INSERT INTO survey_limits (department, max_responses) \
             VALUES ($1, $2) \
             ON CONFLICT (department) DO UPDATE SET \
                 max_responses = EXCLUDED.max_responses, \
                 updated_at = now() \
             RETURNING {SURVEY_LIMIT_COLUMNS}"
        );
        sqlx::query_as::<_, SurveyLimit>(&query)
            .bind(&input.department)
            .bind(input.max_responses)
            .fetch_one(pool)
            .await
    }

    /// List all configured caps, alphabetically by department.
    pub async fn list(pool: &PgPool) -> Result<Vec<SurveyLimit>, sqlx::Error> {
        let query = format!("SELECT {SURVEY_LIMIT_COLUMNS} FROM survey_limits ORDER BY department");
        sqlx::query_as::<_, SurveyLimit>(&query).fetch_all(pool).await
    }

    /// Remove the cap for a department (back to unlimited). Returns
    /// `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, department: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM survey_limits WHERE department = $1")
            .bind(department)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Capacity snapshot for one department: configured cap (if any),
    /// submitted count, and whether another submission would be
    /// accepted. Lowering a cap below current usage never invalidates
    /// existing submissions; it only stops new ones.
    pub async fn department_status(
        pool: &PgPool,
        department: &str,
    ) -> Result<DepartmentStatus, sqlx::Error> {
        let max_responses: Option<i32> =
            sqlx::query_scalar("SELECT max_responses FROM survey_limits WHERE department = $1")
                .bind(department)
                .fetch_optional(pool)
                .await?;

        let submitted_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM surveys WHERE department = $1 AND NOT is_draft",
        )
        .bind(department)
        .fetch_one(pool)
        .await?;

        let accepting = match max_responses {
            Some(cap) => submitted_count < i64::from(cap),
            None => true,
        };

        Ok(DepartmentStatus {
            department: department.to_string(),
            max_responses,
            submitted_count,
            accepting,
        })
    }
}
