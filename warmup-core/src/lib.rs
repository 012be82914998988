//! Warmup Core
//!
//! Core types shared by the warm-up backend client, the status monitor
//! and the CLI.
//!
//! This crate contains:
//! - Domain types: instances, warm-up sessions and poll lifecycle states
//! - DTOs: request and response bodies exchanged with the backend

pub mod domain;
pub mod dto;
