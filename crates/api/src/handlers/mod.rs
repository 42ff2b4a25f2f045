pub mod auth;
pub mod consent_drafts;
pub mod consent_pdfs;
pub mod error_logs;
pub mod personal_info;
pub mod researcher_profiles;
pub mod survey_limits;
pub mod surveys;
