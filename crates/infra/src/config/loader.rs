//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required variables are missing, falls back to a config file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required for the environment path:
//! - `PRASHISKSHAN_DB_PATH`: Queue database file path
//! - `PRASHISKSHAN_API_BASE_URL`: Origin of the applications API
//!
//! Optional (defaults from [`Config::default`]):
//! - `PRASHISKSHAN_DB_POOL_SIZE`: Connection pool size
//! - `PRASHISKSHAN_API_TIMEOUT_SECS`: Per-request timeout
//! - `PRASHISKSHAN_SYNC_GRACE_PERIOD_SECS`: Retention of synced records
//! - `PRASHISKSHAN_SYNC_RETRY_FAILED`: Retry failed records on each pass
//! - `PRASHISKSHAN_LOG_LEVEL`: Default log filter
//! - `PRASHISKSHAN_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./prashiskshan.json` or `./prashiskshan.toml`
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use prashiskshan_domain::{
    ApiConfig, Config, DatabaseConfig, LoggingConfig, PrashiskshanError, Result, SyncConfig,
};

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `PrashiskshanError::Config` if neither source yields a config or
/// the file found cannot be parsed.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `PrashiskshanError::Config` if a required variable is missing or
/// any variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("PRASHISKSHAN_DB_PATH")?;
    let base_url = env_var("PRASHISKSHAN_API_BASE_URL")?;

    let database_defaults = DatabaseConfig::default();
    let api_defaults = ApiConfig::default();
    let sync_defaults = SyncConfig::default();
    let logging_defaults = LoggingConfig::default();

    Ok(Config {
        database: DatabaseConfig {
            path: db_path,
            pool_size: env_parse(
                "PRASHISKSHAN_DB_POOL_SIZE",
                database_defaults.pool_size,
                "pool size",
            )?,
        },
        api: ApiConfig {
            base_url,
            timeout_secs: env_parse(
                "PRASHISKSHAN_API_TIMEOUT_SECS",
                api_defaults.timeout_secs,
                "API timeout",
            )?,
        },
        sync: SyncConfig {
            grace_period_secs: env_parse(
                "PRASHISKSHAN_SYNC_GRACE_PERIOD_SECS",
                sync_defaults.grace_period_secs,
                "grace period",
            )?,
            retry_failed_on_sync: env_bool(
                "PRASHISKSHAN_SYNC_RETRY_FAILED",
                sync_defaults.retry_failed_on_sync,
            ),
        },
        logging: LoggingConfig {
            level: std::env::var("PRASHISKSHAN_LOG_LEVEL").unwrap_or(logging_defaults.level),
            json: env_bool("PRASHISKSHAN_LOG_JSON", logging_defaults.json),
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Format is detected by file extension.
///
/// # Errors
/// Returns `PrashiskshanError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PrashiskshanError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PrashiskshanError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PrashiskshanError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PrashiskshanError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PrashiskshanError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(PrashiskshanError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("prashiskshan.json"),
        dir.join("prashiskshan.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        PrashiskshanError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional numeric variable, falling back to `default` when unset.
fn env_parse<T>(key: &str, default: T, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| PrashiskshanError::Config(format!("Invalid {}: {}", what, e))),
        Err(_) => Ok(default),
    }
}

/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
