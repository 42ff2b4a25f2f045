//! Domain layer for the shift-survey platform.
//!
//! Holds the error taxonomy, shared type aliases, survey-period and
//! schedule validation, consent payload checks, CSV encoding helpers,
//! and the in-memory error log backing the admin log viewer.

pub mod consent;
pub mod error;
pub mod errorlog;
pub mod export;
pub mod schedule;
pub mod types;
