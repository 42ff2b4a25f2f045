//! Survey-period and shift-schedule validation.
//!
//! A survey response carries three JSON maps:
//! - work-type definitions (`id -> { name, start_time, end_time }`)
//! - off-duty-type definitions (`id -> { name }`)
//! - the schedule itself (`date -> shift-type id`), covering the two
//!   fixed calendar months of the study period.
//!
//! Drafts may hold any subset of this data; final submission must pass
//! [`validate_submission`].

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum number of shift/off-duty type definitions per response.
const MAX_TYPE_DEFINITIONS: usize = 50;

/// Maximum length of a shift-type name.
const MAX_TYPE_NAME_LEN: usize = 100;

// ---------------------------------------------------------------------------
// JSON map types
// ---------------------------------------------------------------------------

/// A participant-defined work shift type (e.g. "Day", "Evening", "Night").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftTypeDef {
    pub name: String,
    /// Shift start, `HH:MM` 24-hour clock.
    pub start_time: String,
    /// Shift end, `HH:MM` 24-hour clock. May be earlier than `start_time`
    /// for shifts crossing midnight.
    pub end_time: String,
}

/// A participant-defined off-duty type (e.g. "Off", "Annual leave").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffDutyTypeDef {
    pub name: String,
}

/// Work-type definitions keyed by participant-chosen id.
pub type ShiftTypeMap = BTreeMap<String, ShiftTypeDef>;

/// Off-duty-type definitions keyed by participant-chosen id.
pub type OffDutyTypeMap = BTreeMap<String, OffDutyTypeDef>;

/// Date (`YYYY-MM-DD`) to shift-type id assignments.
pub type ScheduleMap = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Survey period
// ---------------------------------------------------------------------------

/// The two fixed calendar months a schedule must fall within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyPeriod {
    /// First month as `(year, month)`.
    pub first: (i32, u32),
    /// Second month as `(year, month)`.
    pub second: (i32, u32),
}

impl SurveyPeriod {
    /// Parse a period from two `YYYY-MM` strings.
    pub fn parse(first: &str, second: &str) -> Result<Self, CoreError> {
        Ok(Self {
            first: parse_month(first)?,
            second: parse_month(second)?,
        })
    }

    /// Whether the given date falls inside either survey month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let ym = (date.year(), date.month());
        ym == self.first || ym == self.second
    }

    /// Human-readable `YYYY-MM, YYYY-MM` rendering for error messages.
    pub fn describe(&self) -> String {
        format!(
            "{:04}-{:02}, {:04}-{:02}",
            self.first.0, self.first.1, self.second.0, self.second.1
        )
    }
}

/// Parse a `YYYY-MM` month designator.
fn parse_month(s: &str) -> Result<(i32, u32), CoreError> {
    let (year, month) = s
        .split_once('-')
        .ok_or_else(|| CoreError::Validation(format!("Invalid month '{s}', expected YYYY-MM")))?;
    let year: i32 = year
        .parse()
        .map_err(|_| CoreError::Validation(format!("Invalid year in month '{s}'")))?;
    let month: u32 = month
        .parse()
        .map_err(|_| CoreError::Validation(format!("Invalid month in '{s}'")))?;
    if !(1..=12).contains(&month) {
        return Err(CoreError::Validation(format!(
            "Month out of range in '{s}'"
        )));
    }
    Ok((year, month))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate participant-defined work-type definitions.
///
/// Names must be non-empty and bounded; start/end must parse as `HH:MM`.
pub fn validate_work_types(work_types: &ShiftTypeMap) -> Result<(), CoreError> {
    if work_types.len() > MAX_TYPE_DEFINITIONS {
        return Err(CoreError::Validation(format!(
            "Too many work types (max {MAX_TYPE_DEFINITIONS})"
        )));
    }
    for (id, def) in work_types {
        validate_type_name(id, &def.name)?;
        parse_clock(id, &def.start_time)?;
        parse_clock(id, &def.end_time)?;
    }
    Ok(())
}

/// Validate participant-defined off-duty-type definitions.
pub fn validate_off_duty_types(off_duty_types: &OffDutyTypeMap) -> Result<(), CoreError> {
    if off_duty_types.len() > MAX_TYPE_DEFINITIONS {
        return Err(CoreError::Validation(format!(
            "Too many off-duty types (max {MAX_TYPE_DEFINITIONS})"
        )));
    }
    for (id, def) in off_duty_types {
        validate_type_name(id, &def.name)?;
    }
    Ok(())
}

/// Validate a schedule against the survey period and the response's own
/// type definitions.
///
/// Every key must parse as a date inside the period; every value must
/// resolve in the union of `work_types` and `off_duty_types`.
pub fn validate_schedule(
    schedule: &ScheduleMap,
    work_types: &ShiftTypeMap,
    off_duty_types: &OffDutyTypeMap,
    period: &SurveyPeriod,
) -> Result<(), CoreError> {
    for (key, type_id) in schedule {
        let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").map_err(|_| {
            CoreError::Validation(format!("Invalid schedule date '{key}', expected YYYY-MM-DD"))
        })?;

        if !period.contains(date) {
            return Err(CoreError::Validation(format!(
                "Schedule date {key} is outside the survey period ({})",
                period.describe()
            )));
        }

        if !work_types.contains_key(type_id) && !off_duty_types.contains_key(type_id) {
            return Err(CoreError::Validation(format!(
                "Schedule entry {key} references unknown shift type '{type_id}'"
            )));
        }
    }
    Ok(())
}

/// Demographic fields required before a response may be submitted.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFields<'a> {
    pub gender: Option<&'a str>,
    pub birth_year: Option<i32>,
    pub education: Option<&'a str>,
    pub marital_status: Option<&'a str>,
    pub position: Option<&'a str>,
    pub career_years: Option<i32>,
    pub institution_type: Option<&'a str>,
    pub department: Option<&'a str>,
}

/// Validate a draft for final submission.
///
/// Requires the full demographic tuple and a non-empty schedule. The
/// schedule itself must already pass [`validate_schedule`].
pub fn validate_submission(
    fields: &SubmissionFields<'_>,
    schedule_entries: usize,
) -> Result<(), CoreError> {
    let mut missing: Vec<&str> = Vec::new();

    if is_blank(fields.gender) {
        missing.push("gender");
    }
    if fields.birth_year.is_none() {
        missing.push("birth_year");
    }
    if is_blank(fields.education) {
        missing.push("education");
    }
    if is_blank(fields.marital_status) {
        missing.push("marital_status");
    }
    if is_blank(fields.position) {
        missing.push("position");
    }
    if fields.career_years.is_none() {
        missing.push("career_years");
    }
    if is_blank(fields.institution_type) {
        missing.push("institution_type");
    }
    if is_blank(fields.department) {
        missing.push("department");
    }

    if !missing.is_empty() {
        return Err(CoreError::Validation(format!(
            "Missing required fields for submission: {}",
            missing.join(", ")
        )));
    }

    if let Some(year) = fields.birth_year {
        if !(1900..=2020).contains(&year) {
            return Err(CoreError::Validation(format!(
                "Implausible birth year: {year}"
            )));
        }
    }
    if let Some(years) = fields.career_years {
        if !(0..=60).contains(&years) {
            return Err(CoreError::Validation(format!(
                "Implausible career years: {years}"
            )));
        }
    }

    if schedule_entries == 0 {
        return Err(CoreError::Validation(
            "Schedule must contain at least one entry before submission".into(),
        ));
    }

    Ok(())
}

fn is_blank(s: Option<&str>) -> bool {
    s.map_or(true, |v| v.trim().is_empty())
}

fn validate_type_name(id: &str, name: &str) -> Result<(), CoreError> {
    if id.trim().is_empty() {
        return Err(CoreError::Validation("Shift type id must not be empty".into()));
    }
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "Shift type '{id}' has an empty name"
        )));
    }
    if name.len() > MAX_TYPE_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Shift type '{id}' name exceeds {MAX_TYPE_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn parse_clock(id: &str, value: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        CoreError::Validation(format!(
            "Shift type '{id}' has invalid time '{value}', expected HH:MM"
        ))
    })
}
