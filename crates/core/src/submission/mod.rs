//! Public façade used by the UI host

pub mod service;

pub use service::OfflineSubmissionService;
