use std::time::Duration;

use prashiskshan_domain::{LoggingConfig, PrashiskshanError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` overrides `config.level`. Returns `false` when a subscriber was
/// already installed, which is expected in tests.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if config.json {
        builder.json().with_current_span(true).try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        info!(level = %config.level, json = config.json, "tracing initialised");
    }
    installed
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a stable identifier such as `"applications::queue_application"`
/// and must not carry user data.
#[inline]
pub fn log_command_execution(
    command: &str,
    elapsed: Duration,
    success: bool,
    error_type: Option<&'static str>,
) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, error_type = error_type.unwrap_or("unknown"), "command_execution_failure");
    }
}

/// Convert a `PrashiskshanError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &PrashiskshanError) -> &'static str {
    match error {
        PrashiskshanError::StorageUnavailable(_) => "storage_unavailable",
        PrashiskshanError::Database(_) => "database",
        PrashiskshanError::NotFound(_) => "not_found",
        PrashiskshanError::DeliveryFailed(_) => "delivery_failed",
        PrashiskshanError::Config(_) => "config",
        PrashiskshanError::InvalidInput(_) => "invalid_input",
        PrashiskshanError::Internal(_) => "internal",
    }
}
