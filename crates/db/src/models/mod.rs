//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod consent;
pub mod personal_info;
pub mod researcher;
pub mod session;
pub mod survey;
pub mod survey_limit;
