//! Per-job poll configuration

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use warmup_core::domain::poll::PollProgress;

use crate::settings::{DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL, MonitorSettings};

/// Predicate evaluated against every decoded snapshot
pub type Predicate<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// Callback invoked with every decoded snapshot and the job's progress
pub type SnapshotCallback<S> = Arc<dyn Fn(&S, &PollProgress) + Send + Sync>;

/// Configuration of one poll job
///
/// `is_success` is mandatory. `is_failure` is checked first, so a snapshot
/// matching both ends the job as `Failed`.
pub struct PollConfig<S> {
    pub(crate) interval: Duration,
    pub(crate) max_attempts: u32,
    pub(crate) is_success: Predicate<S>,
    pub(crate) is_failure: Option<Predicate<S>>,
    pub(crate) on_snapshot: Option<SnapshotCallback<S>>,
}

impl<S> PollConfig<S> {
    /// Creates a config with the default cadence (2 s, 60 attempts)
    pub fn new(is_success: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            is_success: Arc::new(is_success),
            is_failure: None,
            on_snapshot: None,
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Takes cadence and attempt cap from process-level settings
    pub fn with_settings(self, settings: &MonitorSettings) -> Self {
        self.interval(settings.poll_interval)
            .max_attempts(settings.max_attempts)
    }

    /// Marks snapshots that end the job as `Failed`
    pub fn failure_when(mut self, is_failure: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        self.is_failure = Some(Arc::new(is_failure));
        self
    }

    /// Registers a callback fired on every decoded snapshot
    pub fn on_snapshot(
        mut self,
        on_snapshot: impl Fn(&S, &PollProgress) + Send + Sync + 'static,
    ) -> Self {
        self.on_snapshot = Some(Arc::new(on_snapshot));
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.interval
    }

    pub fn attempt_limit(&self) -> u32 {
        self.max_attempts
    }

    pub(crate) fn validate(&self) -> crate::Result<()> {
        if self.max_attempts == 0 {
            return Err(crate::MonitorError::InvalidConfig(
                "max_attempts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl<S> Clone for PollConfig<S> {
    fn clone(&self) -> Self {
        Self {
            interval: self.interval,
            max_attempts: self.max_attempts,
            is_success: Arc::clone(&self.is_success),
            is_failure: self.is_failure.clone(),
            on_snapshot: self.on_snapshot.clone(),
        }
    }
}

impl<S> fmt::Debug for PollConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollConfig")
            .field("interval", &self.interval)
            .field("max_attempts", &self.max_attempts)
            .field("has_failure_predicate", &self.is_failure.is_some())
            .field("has_snapshot_callback", &self.on_snapshot.is_some())
            .finish()
    }
}
