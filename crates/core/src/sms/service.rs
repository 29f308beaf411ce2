//! SMS webhook handling

use std::sync::Arc;

use prashiskshan_domain::constants::{SMS_FORMAT_HINT, SMS_REFERENCE_PREFIX};
use prashiskshan_domain::{ApplicationSubmission, SmsWebhookPayload, SmsWebhookResponse};
use tracing::{error, info, instrument, warn};

use super::parser::parse_sms_application;
use crate::queue::ports::Clock;
use crate::sync::ports::SubmissionForwarder;

const PROCESSING_FAILED: &str =
    "Sorry, there was an error processing your application. Please try again later.";

/// Turns inbound SMS messages into application submissions.
///
/// The sender's phone number stands in for the student id.
pub struct SmsApplicationService {
    forwarder: Arc<dyn SubmissionForwarder>,
    clock: Arc<dyn Clock>,
}

impl SmsApplicationService {
    pub fn new(forwarder: Arc<dyn SubmissionForwarder>, clock: Arc<dyn Clock>) -> Self {
        Self { forwarder, clock }
    }

    /// Handle one webhook call. Never fails: every outcome is expressed as
    /// a response with a message to text back.
    #[instrument(skip(self, payload), fields(message_sid = %payload.message_sid))]
    pub async fn handle_webhook(&self, payload: &SmsWebhookPayload) -> SmsWebhookResponse {
        let parsed = parse_sms_application(&payload.body);
        if !parsed.is_valid {
            let errors = parsed.errors.join(", ");
            warn!(errors = %errors, "rejected SMS application");
            let reply = format!("Error: {errors}. Format: {SMS_FORMAT_HINT}");
            return SmsWebhookResponse::rejected(errors, reply);
        }

        let submission =
            ApplicationSubmission::from_sms(&parsed.project_id, &payload.from, &parsed.message);

        match self.forwarder.submit(&submission).await {
            Ok(receipt) => {
                let reference = receipt.remote_id.unwrap_or_else(|| {
                    format!("{SMS_REFERENCE_PREFIX}{}", self.clock.now_millis())
                });
                info!(
                    project_id = %parsed.project_id,
                    reference = %reference,
                    "SMS application submitted"
                );
                let reply = format!(
                    "✅ Application submitted for project {}! Reference: {reference}. You'll receive updates on this number.",
                    parsed.project_id
                );
                SmsWebhookResponse::accepted(reference, reply)
            }
            Err(err) => {
                error!(error_kind = err.label(), error = %err, "SMS application delivery failed");
                SmsWebhookResponse::rejected(
                    "Internal server error".to_string(),
                    PROCESSING_FAILED.to_string(),
                )
            }
        }
    }
}
