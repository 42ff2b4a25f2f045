//! Repository for the `researchers` table (admin accounts).

use sqlx::PgPool;

use shiftsurvey_core::types::{DbId, Timestamp};

use crate::models::researcher::{CreateResearcher, Researcher};

/// Column list for `researchers` queries.
const RESEARCHER_COLUMNS: &str = "\
    id, username, email, password_hash, is_active, last_login_at, \
    failed_login_count, locked_until, created_at, updated_at";

/// Provides account operations for researchers.
pub struct ResearcherRepo;

impl ResearcherRepo {
    /// Insert a new researcher account.
    pub async fn create(pool: &PgPool, input: &CreateResearcher) -> Result<Researcher, sqlx::Error> {
        let query = format!(
            "INSERT INTO researchers (username, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {RESEARCHER_COLUMNS}"
        );
        sqlx::query_as::<_, Researcher>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a researcher by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Researcher>, sqlx::Error> {
        let query = format!("SELECT {RESEARCHER_COLUMNS} FROM researchers WHERE id = $1");
        sqlx::query_as::<_, Researcher>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a researcher by username (login lookup).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Researcher>, sqlx::Error> {
        let query = format!("SELECT {RESEARCHER_COLUMNS} FROM researchers WHERE username = $1");
        sqlx::query_as::<_, Researcher>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Total number of accounts. Used by the startup bootstrap.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM researchers")
            .fetch_one(pool)
            .await
    }

    /// Increment the consecutive failed-login counter.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE researchers SET failed_login_count = failed_login_count + 1, \
             updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Lock an account until the given time.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        locked_until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE researchers SET locked_until = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(locked_until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Reset lockout bookkeeping and stamp `last_login_at`.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE researchers SET failed_login_count = 0, locked_until = NULL, \
             last_login_at = now(), updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
