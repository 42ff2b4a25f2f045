//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod consent_draft_repo;
pub mod consent_pdf_repo;
pub mod personal_info_repo;
pub mod researcher_profile_repo;
pub mod researcher_repo;
pub mod session_repo;
pub mod survey_limit_repo;
pub mod survey_repo;

pub use consent_draft_repo::ConsentDraftRepo;
pub use consent_pdf_repo::ConsentPdfRepo;
pub use personal_info_repo::PersonalInfoRepo;
pub use researcher_profile_repo::ResearcherProfileRepo;
pub use researcher_repo::ResearcherRepo;
pub use session_repo::SessionRepo;
pub use survey_limit_repo::SurveyLimitRepo;
pub use survey_repo::SurveyRepo;
