//! Per-department response cap model and DTOs.

use serde::{Deserialize, Serialize};
use shiftsurvey_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Row from the `survey_limits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SurveyLimit {
    pub id: DbId,
    pub department: String,
    pub max_responses: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a department cap.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSurveyLimit {
    pub department: String,
    pub max_responses: i32,
}

/// Capacity snapshot for one department, returned to the wizard before
/// it offers submission.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentStatus {
    pub department: String,
    /// `None` means no cap is configured (unlimited).
    pub max_responses: Option<i32>,
    /// Submitted (non-draft) responses counted against the cap.
    pub submitted_count: i64,
    pub accepting: bool,
}
