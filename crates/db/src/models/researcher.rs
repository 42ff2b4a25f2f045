//! Researcher (admin account) and researcher-profile models and DTOs.

use serde::{Deserialize, Serialize};
use shiftsurvey_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full researcher row from the `researchers` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`ResearcherResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Researcher {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe researcher representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct ResearcherResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&Researcher> for ResearcherResponse {
    fn from(r: &Researcher) -> Self {
        Self {
            id: r.id,
            username: r.username.clone(),
            email: r.email.clone(),
            is_active: r.is_active,
            last_login_at: r.last_login_at,
            created_at: r.created_at,
        }
    }
}

/// DTO for creating a researcher account.
#[derive(Debug, Deserialize)]
pub struct CreateResearcher {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

// ---------------------------------------------------------------------------
// Researcher profiles
// ---------------------------------------------------------------------------

/// Row from the `researcher_profiles` table: the display name and
/// signature image the survey client overlays onto the consent PDF.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResearcherProfile {
    pub id: DbId,
    pub display_name: String,
    /// Signature image, Base64-encoded.
    pub signature_image: String,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a researcher profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResearcherProfile {
    pub display_name: String,
    pub signature_image: String,
    #[serde(default)]
    pub is_default: bool,
}

/// DTO for updating a researcher profile. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateResearcherProfile {
    pub display_name: Option<String>,
    pub signature_image: Option<String>,
    pub is_default: Option<bool>,
}
