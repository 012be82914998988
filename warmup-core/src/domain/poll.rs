//! Poll lifecycle types
//!
//! A poll job starts `Pending` and moves exactly once into one of the
//! terminal states. Nothing transitions out of a terminal state.

use serde::{Deserialize, Serialize};

/// State of a poll job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollState {
    Pending,
    Succeeded,
    Failed,
    TimedOut,
    Cancelled,
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Pending)
    }
}

impl std::fmt::Display for PollState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollState::Pending => write!(f, "Pending"),
            PollState::Succeeded => write!(f, "Succeeded"),
            PollState::Failed => write!(f, "Failed"),
            PollState::TimedOut => write!(f, "TimedOut"),
            PollState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Terminal outcome of a poll job
///
/// `Succeeded` and `Failed` carry the snapshot that matched the caller's
/// predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<S> {
    Succeeded(S),
    Failed(S),
    TimedOut,
    Cancelled,
}

impl<S> PollOutcome<S> {
    /// The terminal state this outcome corresponds to
    pub fn state(&self) -> PollState {
        match self {
            PollOutcome::Succeeded(_) => PollState::Succeeded,
            PollOutcome::Failed(_) => PollState::Failed,
            PollOutcome::TimedOut => PollState::TimedOut,
            PollOutcome::Cancelled => PollState::Cancelled,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PollOutcome::Succeeded(_))
    }

    /// The snapshot that ended the job, if any
    pub fn snapshot(&self) -> Option<&S> {
        match self {
            PollOutcome::Succeeded(s) | PollOutcome::Failed(s) => Some(s),
            PollOutcome::TimedOut | PollOutcome::Cancelled => None,
        }
    }
}

/// Progress of a poll job, published after every poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollProgress {
    /// Polls issued so far, including ones that failed in transport
    pub attempt: u32,
    pub max_attempts: u32,
    pub state: PollState,
}

impl PollProgress {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempt: 0,
            max_attempts,
            state: PollState::Pending,
        }
    }
}
