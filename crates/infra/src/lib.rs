//! # Prashiskshan Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The durable SQLite queue store and its in-memory twin
//! - The HTTP client for the applications API
//! - The host-fed connectivity signal
//! - The Tokio-backed removal scheduler
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `prashiskshan-core`
//! - Contains all "impure" code (I/O, timers, network)

pub mod api;
pub mod clock;
pub mod config;
pub mod connectivity;
pub mod database;
pub mod errors;
pub mod queue;
pub mod scheduling;

pub use api::{ApplicationsApiClient, ApplicationsApiConfig};
pub use clock::SystemClock;
pub use connectivity::ConnectivitySignal;
pub use database::{DbManager, SqliteApplicationQueueRepository};
pub use errors::InfraError;
pub use queue::{generate_queue_id, InMemoryApplicationQueue};
pub use scheduling::TokioRemovalScheduler;
