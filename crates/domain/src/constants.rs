//! Application constants
//!
//! Centralized location for domain-level constants used throughout the
//! application.

// Queue retention
pub const SYNCED_GRACE_PERIOD_SECS: u64 = 24 * 60 * 60;
pub const QUEUED_ID_PREFIX: &str = "queued_";
pub const QUEUED_ID_RANDOM_LEN: usize = 9;

// Remote endpoint
pub const APPLICATIONS_ENDPOINT_PATH: &str = "/api/applications";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

// Storage
pub const DEFAULT_DB_PATH: &str = "prashiskshan-offline.db";
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

// SMS channel
pub const SMS_APPLY_COMMAND: &str = "APPLY";
pub const SMS_DEFAULT_MESSAGE: &str = "Applied via SMS";
pub const SMS_FORMAT_HINT: &str = "APPLY <PROJECT_ID> <MESSAGE>";
pub const SMS_REFERENCE_PREFIX: &str = "app_sms_";
