//! First-run provisioning of the researcher account.
//!
//! The survey has a single research team behind it; when the
//! `researchers` table is empty at startup, an account is created from
//! `ADMIN_USERNAME` / `ADMIN_PASSWORD` / `ADMIN_EMAIL`. Subsequent
//! starts leave existing accounts untouched.

use shiftsurvey_db::models::researcher::CreateResearcher;
use shiftsurvey_db::repositories::ResearcherRepo;
use sqlx::PgPool;

use crate::auth::password::{hash_password, validate_password_strength};

/// Minimum length for the bootstrapped admin password.
const MIN_ADMIN_PASSWORD_LEN: usize = 12;

/// Create the initial researcher account if none exists.
pub async fn ensure_admin_account(pool: &PgPool) -> Result<(), String> {
    let count = ResearcherRepo::count(pool)
        .await
        .map_err(|e| format!("Failed to count researcher accounts: {e}"))?;

    if count > 0 {
        tracing::debug!(count, "Researcher accounts already exist, skipping bootstrap");
        return Ok(());
    }

    let (username, password) = match (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        (Ok(u), Ok(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            tracing::warn!(
                "No researcher accounts exist and ADMIN_USERNAME/ADMIN_PASSWORD are not set; \
                 admin endpoints will be unreachable"
            );
            return Ok(());
        }
    };

    validate_password_strength(&password, MIN_ADMIN_PASSWORD_LEN)?;

    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| format!("{username}@localhost"));

    let password_hash =
        hash_password(&password).map_err(|e| format!("Failed to hash admin password: {e}"))?;

    let input = CreateResearcher {
        username,
        email,
        password_hash,
    };
    let researcher = ResearcherRepo::create(pool, &input)
        .await
        .map_err(|e| format!("Failed to create admin account: {e}"))?;

    tracing::info!(
        researcher_id = researcher.id,
        username = %researcher.username,
        "Bootstrapped initial researcher account"
    );
    Ok(())
}
