//! Warm-up domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A warm-up session exchanging synthetic traffic between instances
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmupSession {
    pub id: String,
    pub instances: Vec<String>,
    pub status: WarmupStatus,
    #[serde(default)]
    pub messages_sent: u64,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

/// Status of a warm-up session
///
/// Unrecognised values are preserved in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WarmupStatus {
    Active,
    Paused,
    Stopped,
    Unknown(String),
}

impl WarmupStatus {
    /// Wire representation of this status
    pub fn as_str(&self) -> &str {
        match self {
            WarmupStatus::Active => "active",
            WarmupStatus::Paused => "paused",
            WarmupStatus::Stopped => "stopped",
            WarmupStatus::Unknown(raw) => raw,
        }
    }
}

impl From<String> for WarmupStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "active" | "running" => WarmupStatus::Active,
            "paused" => WarmupStatus::Paused,
            "stopped" => WarmupStatus::Stopped,
            _ => WarmupStatus::Unknown(raw),
        }
    }
}

impl From<WarmupStatus> for String {
    fn from(status: WarmupStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for WarmupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarmupStatus::Active => write!(f, "Active"),
            WarmupStatus::Paused => write!(f, "Paused"),
            WarmupStatus::Stopped => write!(f, "Stopped"),
            WarmupStatus::Unknown(raw) => write!(f, "Unknown({})", raw),
        }
    }
}

/// Status of one warm-up session observed at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmupSnapshot {
    pub warmup_id: String,
    pub status: WarmupStatus,
    pub messages_sent: u64,
    pub observed_at: DateTime<Utc>,
}
