//! SMS application channel types
//!
//! Field names on [`SmsWebhookPayload`] follow the Twilio form encoding.

use serde::{Deserialize, Serialize};

/// Inbound SMS webhook form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SmsWebhookPayload {
    pub from: String,
    pub body: String,
    pub message_sid: String,
    pub account_sid: String,
    #[serde(default)]
    pub messaging_service_sid: Option<String>,
    pub num_media: String,
    #[serde(default)]
    pub profile_name: Option<String>,
    pub sms_message_sid: String,
    pub sms_sid: String,
    pub sms_status: String,
    pub to: String,
    pub api_version: String,
}

/// Result of parsing an `APPLY <PROJECT_ID> <MESSAGE>` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSmsApplication {
    pub command: String,
    pub project_id: String,
    pub message: String,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Outcome of handling one webhook call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsWebhookResponse {
    pub success: bool,
    pub application_id: Option<String>,
    pub error: Option<String>,
    /// Text sent back to the applicant.
    pub response_message: String,
}

impl SmsWebhookResponse {
    pub fn accepted(application_id: String, response_message: String) -> Self {
        Self {
            success: true,
            application_id: Some(application_id),
            error: None,
            response_message,
        }
    }

    pub fn rejected(error: String, response_message: String) -> Self {
        Self { success: false, application_id: None, error: Some(error), response_message }
    }
}
