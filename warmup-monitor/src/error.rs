//! Error types for the status monitor

use thiserror::Error;

/// Result type alias for monitor operations
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Errors surfaced by the monitor itself
///
/// Poll failures never show up here: transport errors are counted as used
/// attempts and every other ending is a [`crate::PollOutcome`].
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The job was rejected before any request was issued
    #[error("Invalid poll configuration: {0}")]
    InvalidConfig(String),

    /// The poll task panicked, usually inside a caller callback
    #[error("Poll task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
