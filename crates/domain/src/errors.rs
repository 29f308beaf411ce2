//! Error types used throughout the application

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Prashiskshan
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PrashiskshanError {
    /// The durable queue store cannot be opened (disabled, quota exhausted,
    /// unreadable file). Fatal for queueing and syncing.
    #[error("Offline storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PrashiskshanError {
    /// Storage-level errors abort the current operation and should be shown
    /// to the user as "offline storage unavailable".
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_) | Self::Database(_))
    }
}

/// Result type alias for Prashiskshan operations
pub type Result<T> = std::result::Result<T, PrashiskshanError>;

/// Categories of delivery errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryErrorCategory {
    /// Rejected request (4xx except 429) - resubmitting the same payload
    /// will not help
    Client,
    /// Remote failure (5xx)
    Server,
    /// Rate limiting (429, 503)
    RateLimit,
    /// Connection failures and timeouts
    Network,
    /// Misconfigured client (bad base URL, unsupported scheme)
    Config,
}

/// Errors produced while delivering one application to the remote endpoint.
///
/// The sync engine treats every variant identically (the record is marked
/// `failed`); the category only feeds logging and the HTTP client's retry
/// decisions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Client error: {0}")]
    Client(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl DeliveryError {
    /// Get the error category for this error
    pub fn category(&self) -> DeliveryErrorCategory {
        match self {
            Self::Client(_) => DeliveryErrorCategory::Client,
            Self::Server(_) => DeliveryErrorCategory::Server,
            Self::RateLimit(_) => DeliveryErrorCategory::RateLimit,
            Self::Network(_) | Self::Timeout(_) => DeliveryErrorCategory::Network,
            Self::Config(_) => DeliveryErrorCategory::Config,
        }
    }

    /// Check if resubmitting later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self.category(),
            DeliveryErrorCategory::Server
                | DeliveryErrorCategory::RateLimit
                | DeliveryErrorCategory::Network
        )
    }

    /// Stable label suitable for structured log fields
    pub fn label(&self) -> &'static str {
        match self.category() {
            DeliveryErrorCategory::Client => "client",
            DeliveryErrorCategory::Server => "server",
            DeliveryErrorCategory::RateLimit => "rate_limit",
            DeliveryErrorCategory::Network => "network",
            DeliveryErrorCategory::Config => "config",
        }
    }
}

impl From<DeliveryError> for PrashiskshanError {
    fn from(err: DeliveryError) -> Self {
        Self::DeliveryFailed(err.to_string())
    }
}
