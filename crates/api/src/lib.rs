//! # Prashiskshan App
//!
//! Application layer - commands and the host entry point.
//!
//! This crate contains:
//! - Commands (UI host → backend bridge)
//! - Application context (dependency injection)
//! - Logging setup and command instrumentation
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
