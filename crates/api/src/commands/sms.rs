//! SMS webhook command

use std::time::Instant;

use prashiskshan_core::render_twiml;
use prashiskshan_domain::{SmsWebhookPayload, SmsWebhookResponse};

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Handle an inbound SMS and return the TwiML reply body.
pub async fn handle_sms_webhook(ctx: &AppContext, payload: SmsWebhookPayload) -> String {
    render_twiml(&handle_sms_webhook_json(ctx, payload).await.response_message)
}

/// Same as [`handle_sms_webhook`] but returns the structured outcome.
pub async fn handle_sms_webhook_json(
    ctx: &AppContext,
    payload: SmsWebhookPayload,
) -> SmsWebhookResponse {
    let start = Instant::now();
    let response = ctx.sms.handle_webhook(&payload).await;
    let error_type = (!response.success).then_some("sms_rejected");
    log_command_execution("sms::handle_sms_webhook", start.elapsed(), response.success, error_type);
    response
}
