//! promptgate - request gate for LLM-backed retrieval pipelines
//!
//! This crate provides:
//! - HMAC-SHA256 signed command tokens (`$Sys.command.<n>.<digest>`)
//! - Token extraction and constant-time verification
//! - Input sanitization that preserves a verified token
//! - Denylist enforcement, fail closed, with a nested user-facing error chain
//! - Query intake for chat front ends, plus a CLI

pub mod cli;
pub mod config;
pub mod gate;
pub mod intake;

pub use config::Config;
pub use gate::{Gatekeeper, ProcessingError, SecretKey, process};
pub use intake::{IntakeOutcome, QueryKind, gate_query};
