//! Deferred work scheduled on the Tokio runtime
//!
//! Timers are tracked by join handle and cancelled through a shared
//! `CancellationToken` on shutdown.

pub mod removal;

pub use removal::TokioRemovalScheduler;
