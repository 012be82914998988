//! Instance DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::instance::{ConnectionState, InstanceSnapshot};

/// Body of `GET /instance/connectionState/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionStateResponse {
    pub instance: InstanceStateBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceStateBody {
    pub instance_name: String,
    pub state: ConnectionState,
}

impl ConnectionStateResponse {
    /// Converts the response into a snapshot stamped with `observed_at`
    pub fn into_snapshot(self, observed_at: DateTime<Utc>) -> InstanceSnapshot {
        InstanceSnapshot {
            instance_name: self.instance.instance_name,
            state: self.instance.state,
            observed_at,
        }
    }
}
