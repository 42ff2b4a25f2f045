//! Personal-info model and DTOs.
//!
//! Collected only on explicit consent, linked 1:1 to a survey response,
//! and intended for deletion once incentive fulfillment is done.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shiftsurvey_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Row from the `personal_info` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PersonalInfo {
    pub id: DbId,
    pub survey_id: DbId,
    pub name: String,
    pub birth_date: NaiveDate,
    /// Stored digits-only (see `shiftsurvey_core::consent::normalize_phone`).
    pub phone: String,
    pub created_at: Timestamp,
}

/// DTO for creating a personal-info record. The survey id comes from
/// the request path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePersonalInfo {
    pub name: String,
    pub birth_date: NaiveDate,
    pub phone: String,
}
