//! Data Transfer Objects
//!
//! Request and response bodies exchanged with the warm-up backend. DTOs
//! mirror the wire shape; conversions turn them into domain snapshots.

pub mod instance;
pub mod warmup;
