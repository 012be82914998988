//! Warm-up DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::warmup::{WarmupSnapshot, WarmupStatus};

/// Request to start a warm-up between instances
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartWarmup {
    pub instances: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<u32>,
}

/// Body of `GET /warmup/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmupStatusResponse {
    pub id: String,
    pub status: WarmupStatus,
    #[serde(default)]
    pub messages_sent: u64,
}

impl WarmupStatusResponse {
    /// Converts the response into a snapshot stamped with `observed_at`
    pub fn into_snapshot(self, observed_at: DateTime<Utc>) -> WarmupSnapshot {
        WarmupSnapshot {
            warmup_id: self.id,
            status: self.status,
            messages_sent: self.messages_sent,
            observed_at,
        }
    }
}
