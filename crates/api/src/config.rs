use shiftsurvey_core::schedule::SurveyPeriod;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except `JWT_SECRET` have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// The two calendar months schedule entries must fall within.
    pub survey_period: SurveyPeriod,
    /// Consent draft lifetime in minutes (default: `1440`, one day).
    pub consent_draft_ttl_mins: i64,
    /// How often the expired-draft sweeper runs, in seconds (default: `3600`).
    pub draft_sweep_interval_secs: u64,
    /// In-memory error log capacity (default: `500`).
    pub error_log_capacity: usize,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `SURVEY_MONTH_FIRST`      | `2025-04`               |
    /// | `SURVEY_MONTH_SECOND`     | `2025-05`               |
    /// | `CONSENT_DRAFT_TTL_MINS`  | `1440`                  |
    /// | `DRAFT_SWEEP_INTERVAL_SECS` | `3600`                |
    /// | `ERROR_LOG_CAPACITY`      | `500`                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let first = std::env::var("SURVEY_MONTH_FIRST").unwrap_or_else(|_| "2025-04".into());
        let second = std::env::var("SURVEY_MONTH_SECOND").unwrap_or_else(|_| "2025-05".into());
        let survey_period =
            SurveyPeriod::parse(&first, &second).expect("SURVEY_MONTH_* must be YYYY-MM");

        let consent_draft_ttl_mins: i64 = std::env::var("CONSENT_DRAFT_TTL_MINS")
            .unwrap_or_else(|_| "1440".into())
            .parse()
            .expect("CONSENT_DRAFT_TTL_MINS must be a valid i64");

        let draft_sweep_interval_secs: u64 = std::env::var("DRAFT_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("DRAFT_SWEEP_INTERVAL_SECS must be a valid u64");

        let error_log_capacity: usize = std::env::var("ERROR_LOG_CAPACITY")
            .unwrap_or_else(|_| "500".into())
            .parse()
            .expect("ERROR_LOG_CAPACITY must be a valid usize");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            survey_period,
            consent_draft_ttl_mins,
            draft_sweep_interval_secs,
            error_log_capacity,
            jwt,
        }
    }
}
