//! Core domain types
//!
//! These types describe the entities the backend manages (messaging
//! instances and warm-up sessions) and the lifecycle of a status poll.
//! They are shared between the HTTP client, the monitor and the CLI.

pub mod instance;
pub mod poll;
pub mod warmup;
