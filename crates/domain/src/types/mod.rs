//! Domain types and models

pub mod queue;
pub mod sms;
pub mod submission;

// Re-export for convenience
pub use queue::{NewApplication, QueueStatus, QueueSummary, QueuedApplication, StorageUsage};
pub use sms::{ParsedSmsApplication, SmsWebhookPayload, SmsWebhookResponse};
pub use submission::{ApplicationSubmission, SubmissionChannel, SubmissionReceipt};
