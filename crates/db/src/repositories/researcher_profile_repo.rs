//! Repository for the `researcher_profiles` table.
//!
//! Profiles hold the display name and signature image the survey client
//! overlays onto the consent document. At most one profile is the
//! default (partial unique index); the public endpoint serves that one.

use sqlx::PgPool;

use shiftsurvey_core::types::DbId;

use crate::models::researcher::{
    CreateResearcherProfile, ResearcherProfile, UpdateResearcherProfile,
};

/// Column list for `researcher_profiles` queries.
const PROFILE_COLUMNS: &str =
    "id, display_name, signature_image, is_default, created_at, updated_at";

/// Provides CRUD operations for researcher profiles.
pub struct ResearcherProfileRepo;

impl ResearcherProfileRepo {
    /// Insert a profile. When `is_default` is set, any previous default
    /// is cleared in the same transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateResearcherProfile,
    ) -> Result<ResearcherProfile, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_default {
            sqlx::query("UPDATE researcher_profiles SET is_default = FALSE WHERE is_default")
                .execute(&mut *tx)
                .await?;
        }

        let query = format!(
            "INSERT INTO researcher_profiles (display_name, signature_image, is_default) \
             VALUES ($1, $2, $3) \
             RETURNING {PROFILE_COLUMNS}"
        );
        let profile = sqlx::query_as::<_, ResearcherProfile>(&query)
            .bind(&input.display_name)
            .bind(&input.signature_image)
            .bind(input.is_default)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(profile)
    }

    /// The default profile, falling back to the most recent one when no
    /// default is marked.
    pub async fn find_default(pool: &PgPool) -> Result<Option<ResearcherProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM researcher_profiles \
             ORDER BY is_default DESC, created_at DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, ResearcherProfile>(&query)
            .fetch_optional(pool)
            .await
    }

    /// List all profiles, default first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ResearcherProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM researcher_profiles \
             ORDER BY is_default DESC, created_at DESC"
        );
        sqlx::query_as::<_, ResearcherProfile>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a profile. Setting `is_default = true` clears the flag on
    /// all other profiles in the same transaction. Returns `None` if no
    /// profile with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateResearcherProfile,
    ) -> Result<Option<ResearcherProfile>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_default == Some(true) {
            sqlx::query(
                "UPDATE researcher_profiles SET is_default = FALSE WHERE is_default AND id <> $1",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "UPDATE researcher_profiles SET \
                 display_name = COALESCE($2, display_name), \
                 signature_image = COALESCE($3, signature_image), \
                 is_default = COALESCE($4, is_default), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {PROFILE_COLUMNS}"
        );
        let profile = sqlx::query_as::<_, ResearcherProfile>(&query)
            .bind(id)
            .bind(&input.display_name)
            .bind(&input.signature_image)
            .bind(input.is_default)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(profile)
    }

    /// Delete a profile. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM researcher_profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
