use std::sync::Arc;

use shiftsurvey_core::errorlog::ErrorLog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: shiftsurvey_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Bounded in-memory log of recent request errors, served to the
    /// admin log viewer.
    pub error_log: Arc<ErrorLog>,
}
