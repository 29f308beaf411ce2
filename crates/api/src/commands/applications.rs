//! Offline application queue commands

use std::time::Instant;

use prashiskshan_domain::{
    PrashiskshanError, QueueSummary, QueuedApplication, Result as DomainResult, StorageUsage,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::context::AppContext;
use crate::utils::logging::{error_label, log_command_execution};

/// Arguments of [`queue_application`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueApplicationRequest {
    pub project_id: String,
    pub student_id: String,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

fn finish<T>(command: &str, start: Instant, result: DomainResult<T>) -> Result<T, String> {
    let label = result.as_ref().err().map(error_label);
    log_command_execution(command, start.elapsed(), result.is_ok(), label);
    result.map_err(|e| e.to_string())
}

/// Queue an application. Succeeds offline; returns the local queue id.
pub async fn queue_application(
    ctx: &AppContext,
    request: QueueApplicationRequest,
) -> Result<String, String> {
    let start = Instant::now();
    let result = ctx
        .submissions
        .queue_application(
            &request.project_id,
            &request.student_id,
            request.cover_letter.as_deref(),
        )
        .await;
    finish("applications::queue_application", start, result)
}

/// Every queued record, oldest first.
pub async fn list_queued_applications(ctx: &AppContext) -> Result<Vec<QueuedApplication>, String> {
    let start = Instant::now();
    let result = ctx.submissions.get_queued_applications().await;
    finish("applications::list_queued_applications", start, result)
}

/// Run a sync pass now and return what it delivered.
///
/// Attempts delivery even when the connectivity flag says offline; the flag
/// is advisory and the HTTP client reports the real outcome.
pub async fn sync_queued_applications(
    ctx: &AppContext,
) -> Result<Vec<QueuedApplication>, String> {
    let start = Instant::now();
    if !ctx.submissions.is_online() {
        info!("manual sync requested while offline");
    }
    let result = ctx.submissions.trigger_sync().await;
    finish("applications::sync_queued_applications", start, result)
}

pub async fn retry_failed_applications(ctx: &AppContext) -> Result<usize, String> {
    let start = Instant::now();
    let result = ctx.submissions.retry_failed().await;
    finish("applications::retry_failed_applications", start, result)
}

pub async fn get_queue_summary(ctx: &AppContext) -> Result<QueueSummary, String> {
    let start = Instant::now();
    let result = ctx.submissions.queue_summary().await;
    finish("applications::get_queue_summary", start, result)
}

/// Bytes used by the queue database and its page quota.
pub async fn get_storage_usage(ctx: &AppContext) -> Result<StorageUsage, String> {
    let start = Instant::now();
    let db = ctx.db.clone();
    let result = tokio::task::spawn_blocking(move || db.storage_usage())
        .await
        .map_err(|e| PrashiskshanError::Internal(format!("storage usage task failed: {e}")))
        .and_then(|inner| inner);
    finish("applications::get_storage_usage", start, result)
}
