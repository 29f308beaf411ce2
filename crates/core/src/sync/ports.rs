//! Port interfaces for sync operations

use std::time::Duration;

use async_trait::async_trait;
use prashiskshan_domain::{ApplicationSubmission, DeliveryError, SubmissionReceipt};

/// Delivers one application to the remote applications endpoint.
#[async_trait]
pub trait SubmissionForwarder: Send + Sync {
    /// Submit a single application.
    ///
    /// Any non-success response or transport failure is a
    /// [`DeliveryError`]; the caller decides what happens to the record.
    async fn submit(
        &self,
        submission: &ApplicationSubmission,
    ) -> std::result::Result<SubmissionReceipt, DeliveryError>;
}

/// Deletes a record from the queue after a delay.
///
/// Scheduled removals are fire-and-forget and do not survive a restart;
/// hosts purge expired records on startup instead.
pub trait RemovalScheduler: Send + Sync {
    fn schedule_removal(&self, id: &str, delay: Duration);
}
