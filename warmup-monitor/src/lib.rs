//! Warmup Monitor
//!
//! Polls a remote status endpoint until a caller-defined condition holds.
//!
//! Architecture:
//! - Source: the [`StatusSource`] seam, plus HTTP-backed sources for
//!   instance connection state and warm-up status
//! - Config: per-job [`PollConfig`] (predicates, cadence, attempt cap) and
//!   process-level [`MonitorSettings`] loaded from the environment
//! - Monitor: [`ConnectionPollingMonitor`] spawns one task per job and
//!   hands back a [`PollHandle`] for cancellation and the terminal outcome
//! - Presets: ready-made configs for the instance-connect and warm-up flows
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use warmup_client::BackendClient;
//! use warmup_monitor::{ConnectionPollingMonitor, InstanceStatusSource, presets};
//!
//! # async fn example() -> Result<(), warmup_monitor::MonitorError> {
//! let client = Arc::new(BackendClient::new("http://localhost:8080"));
//! let monitor = ConnectionPollingMonitor::new(InstanceStatusSource::new(client));
//!
//! let handle = monitor.start("sales-01", presets::instance_connection())?;
//! let outcome = handle.wait().await?;
//! println!("finished as {}", outcome.state());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod monitor;
pub mod presets;
pub mod settings;
pub mod source;

pub use config::PollConfig;
pub use error::{MonitorError, Result};
pub use monitor::{CancelHandle, ConnectionPollingMonitor, PollHandle};
pub use settings::MonitorSettings;
pub use source::{FnSource, InstanceStatusSource, SourceError, StatusSource, WarmupStatusSource};
pub use warmup_core::domain::poll::{PollOutcome, PollProgress, PollState};
