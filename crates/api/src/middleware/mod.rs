pub mod auth;
pub mod error_log;
