//! Survey response model and DTOs.

use serde::{Deserialize, Serialize};
use shiftsurvey_core::schedule::{OffDutyTypeMap, ScheduleMap, ShiftTypeMap};
use shiftsurvey_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// Full row from the `surveys` table.
///
/// Demographic columns are nullable because the wizard saves drafts
/// step by step; [`shiftsurvey_core::schedule::validate_submission`]
/// enforces completeness at submit time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Survey {
    pub id: DbId,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub education: Option<String>,
    pub marital_status: Option<String>,
    pub position: Option<String>,
    pub career_years: Option<i32>,
    pub institution_type: Option<String>,
    pub department: Option<String>,
    pub work_types: Json<ShiftTypeMap>,
    pub off_duty_types: Json<OffDutyTypeMap>,
    pub schedule: Json<ScheduleMap>,
    pub is_draft: bool,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Compact row for the admin response table. Skips the JSONB maps and
/// reports whether linked consent/identity records exist.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SurveySummary {
    pub id: DbId,
    pub department: Option<String>,
    pub position: Option<String>,
    pub institution_type: Option<String>,
    pub is_draft: bool,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub has_personal_info: bool,
    pub has_consent_pdf: bool,
}

/// DTO for creating a draft. Any subset of fields may be present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSurvey {
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub education: Option<String>,
    pub marital_status: Option<String>,
    pub position: Option<String>,
    pub career_years: Option<i32>,
    pub institution_type: Option<String>,
    pub department: Option<String>,
    pub work_types: Option<ShiftTypeMap>,
    pub off_duty_types: Option<OffDutyTypeMap>,
    pub schedule: Option<ScheduleMap>,
}

/// DTO for updating a draft. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSurvey {
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub education: Option<String>,
    pub marital_status: Option<String>,
    pub position: Option<String>,
    pub career_years: Option<i32>,
    pub institution_type: Option<String>,
    pub department: Option<String>,
    pub work_types: Option<ShiftTypeMap>,
    pub off_duty_types: Option<OffDutyTypeMap>,
    pub schedule: Option<ScheduleMap>,
}

/// Query parameters for the admin survey list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveyListParams {
    /// Filter by department.
    pub department: Option<String>,
    /// Include in-progress drafts. Defaults to submitted-only.
    pub include_drafts: Option<bool>,
    /// Maximum results. Defaults to 100.
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}

/// Outcome of a submit attempt. The repository distinguishes these so
/// the API can map each to its own status code.
#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted(Box<Survey>),
    AlreadySubmitted,
    DepartmentFull,
    NotFound,
}
