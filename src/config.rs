//! Configuration module

use std::env;
use std::time::Duration;

use crate::constants;

/// Client configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the IDS backend
    pub server_url: String,

    /// Interval between poll cycles
    pub poll_interval: Duration,

    /// Number of log entries requested per cycle
    pub log_limit: usize,

    /// HTTP request timeout
    pub request_timeout: Duration,
}

impl DashboardConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            server_url: env::var("IDS_SERVER_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),

            poll_interval: env::var("IDS_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(constants::POLL_INTERVAL),

            log_limit: env::var("IDS_LOG_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(constants::DEFAULT_LOG_LIMIT),

            request_timeout: env::var("IDS_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(constants::REQUEST_TIMEOUT),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            poll_interval: constants::POLL_INTERVAL,
            log_limit: constants::DEFAULT_LOG_LIMIT,
            request_timeout: constants::REQUEST_TIMEOUT,
        }
    }
}
