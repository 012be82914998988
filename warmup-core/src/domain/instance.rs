//! Instance domain types
//!
//! An instance is one messaging-platform session managed by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A messaging-platform instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// Instance name, used as its identifier in every endpoint
    pub name: String,

    /// Current connection state
    #[serde(alias = "connectionStatus")]
    pub state: ConnectionState,

    /// Phone identity once paired
    #[serde(default)]
    pub owner_jid: Option<String>,

    /// Display name reported by the platform
    #[serde(default)]
    pub profile_name: Option<String>,
}

/// Connection state of an instance as reported by the backend
///
/// The backend reports lowercase strings. Values this crate does not know
/// about are kept verbatim in `Unknown` instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectionState {
    /// Paired and ready to send messages
    Open,

    /// Waiting for the QR code to be scanned
    Connecting,

    /// Not connected
    Closed,

    /// Any other value
    Unknown(String),
}

impl ConnectionState {
    /// Wire representation of this state
    pub fn as_str(&self) -> &str {
        match self {
            ConnectionState::Open => "open",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Closed => "close",
            ConnectionState::Unknown(raw) => raw,
        }
    }
}

impl From<String> for ConnectionState {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "open" => ConnectionState::Open,
            "connecting" => ConnectionState::Connecting,
            "close" | "closed" => ConnectionState::Closed,
            _ => ConnectionState::Unknown(raw),
        }
    }
}

impl From<ConnectionState> for String {
    fn from(state: ConnectionState) -> Self {
        state.as_str().to_string()
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Open => write!(f, "Open"),
            ConnectionState::Connecting => write!(f, "Connecting"),
            ConnectionState::Closed => write!(f, "Closed"),
            ConnectionState::Unknown(raw) => write!(f, "Unknown({})", raw),
        }
    }
}

/// Connection state of one instance observed at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceSnapshot {
    pub instance_name: String,
    pub state: ConnectionState,
    pub observed_at: DateTime<Utc>,
}

impl InstanceSnapshot {
    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }
}

/// QR payload returned when a connection is requested
///
/// Depending on the platform either the raw `code`, a rendered `base64`
/// image, or a numeric `pairing_code` may be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub base64: Option<String>,
    #[serde(default)]
    pub pairing_code: Option<String>,
    /// How many QR codes the backend has generated for this session
    #[serde(default)]
    pub count: Option<u32>,
}

impl QrCode {
    /// True when the backend returned nothing to scan or type
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.base64.is_none() && self.pairing_code.is_none()
    }
}
