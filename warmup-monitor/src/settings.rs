//! Monitor settings
//!
//! Process-level polling defaults. Per-job configs start from these values
//! and may override them.

use std::time::Duration;

/// Default delay between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Default cap on polls before a job times out
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;

/// Polling defaults
///
/// Both values are tunable so slow backends can be given more room without
/// touching the call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Delay between the end of one poll and the start of the next
    pub poll_interval: Duration,

    /// Hard cap on polls issued by one job
    pub max_attempts: u32,
}

impl MonitorSettings {
    /// Creates settings with explicit values
    pub fn new(poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            poll_interval,
            max_attempts,
        }
    }

    /// Creates settings from environment variables
    ///
    /// Expected environment variables:
    /// - WARMUP_POLL_INTERVAL_MS (optional, milliseconds, default: 2000)
    /// - WARMUP_POLL_MAX_ATTEMPTS (optional, default: 60)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let poll_interval = std::env::var("WARMUP_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        let max_attempts = std::env::var("WARMUP_POLL_MAX_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);

        Self {
            poll_interval,
            max_attempts,
        }
    }

    /// Validates the settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_attempts == 0 {
            return Err(crate::MonitorError::InvalidConfig(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_MAX_ATTEMPTS)
    }
}
