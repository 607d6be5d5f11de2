//! Shared constants for the dashboard client.

use std::time::Duration;

/// Interval between poll cycles (status + logs).
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Number of log entries requested per poll cycle.
pub const DEFAULT_LOG_LIMIT: usize = 20;

/// HTTP request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Counter animation: total duration and step count.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(500);
pub const ANIMATION_STEPS: u32 = 20;

/// Delay before the upload status line clears itself.
pub const UPLOAD_STATUS_CLEAR_DELAY: Duration = Duration::from_millis(5000);

/// Live clock refresh cadence.
pub const CLOCK_INTERVAL: Duration = Duration::from_secs(1);

// Backend endpoint paths
pub const STATUS_PATH: &str = "/api/status";
pub const LOGS_PATH: &str = "/api/logs";
pub const CONTROL_PATH: &str = "/api/control";
pub const UPLOAD_PATH: &str = "/api/upload";
pub const HEALTH_PATH: &str = "/api/health";
