//! # Prashiskshan Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for storage, connectivity, delivery
//!   and timers
//! - The sync engine that drains the offline queue
//! - The submission façade used by the UI host
//! - The SMS application channel
//!
//! ## Architecture Principles
//! - Only depends on `prashiskshan-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod connectivity;
pub mod queue;
pub mod sms;
pub mod submission;
pub mod sync;

// Re-export specific items to avoid ambiguity
pub use connectivity::ports::{ConnectivityCallback, ConnectivityMonitor, Subscription};
pub use queue::ports::{ApplicationQueueStore, Clock};
pub use sms::{parse_sms_application, render_twiml, SmsApplicationService};
pub use submission::OfflineSubmissionService;
pub use sync::ports::{RemovalScheduler, SubmissionForwarder};
pub use sync::SyncEngine;
