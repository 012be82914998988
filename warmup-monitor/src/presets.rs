//! Ready-made poll configurations
//!
//! Every feature that waits on the backend is one of these configs run by
//! the same monitor. Callers can still adjust cadence or add a snapshot
//! callback through the [`PollConfig`] builder.

use warmup_core::domain::instance::{ConnectionState, InstanceSnapshot};
use warmup_core::domain::warmup::{WarmupSnapshot, WarmupStatus};

use crate::config::PollConfig;

/// Waits for a freshly requested instance to reach `open`
///
/// There is no failure predicate: a `close` state right after requesting a
/// QR code is normal, so only the attempt cap ends an unpaired instance.
pub fn instance_connection() -> PollConfig<InstanceSnapshot> {
    PollConfig::new(|snapshot: &InstanceSnapshot| snapshot.state == ConnectionState::Open)
}

/// Waits for a warm-up to become active, failing if it stops instead
pub fn warmup_started() -> PollConfig<WarmupSnapshot> {
    PollConfig::new(|snapshot: &WarmupSnapshot| snapshot.status == WarmupStatus::Active)
        .failure_when(|snapshot: &WarmupSnapshot| snapshot.status == WarmupStatus::Stopped)
}

/// Waits for a warm-up to report `stopped`
pub fn warmup_stopped() -> PollConfig<WarmupSnapshot> {
    PollConfig::new(|snapshot: &WarmupSnapshot| snapshot.status == WarmupStatus::Stopped)
}
