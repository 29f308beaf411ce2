//! Application configuration
//!
//! Every section carries serde defaults so a partial config file (or an
//! empty one) still yields a usable [`Config`].

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_TIMEOUT_SECS, DEFAULT_DB_PATH, DEFAULT_DB_POOL_SIZE, SYNCED_GRACE_PERIOD_SECS,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: DEFAULT_DB_PATH.to_string(), pool_size: DEFAULT_DB_POOL_SIZE }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// How long a `synced` record stays in the queue before removal.
    pub grace_period_secs: u64,
    /// Re-mark `failed` records as `queued` at the start of each pass.
    pub retry_failed_on_sync: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { grace_period_secs: SYNCED_GRACE_PERIOD_SECS, retry_failed_on_sync: true }
    }
}

impl SyncConfig {
    pub fn grace_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.grace_period_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin of the applications API, without the endpoint path.
    pub base_url: String,
    /// Bound on a single delivery POST.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database.path, DEFAULT_DB_PATH);
        assert_eq!(config.sync.grace_period_secs, 86_400);
        assert!(config.sync.retry_failed_on_sync);
        assert_eq!(config.api.timeout_secs, 30);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "sync": { "grace_period_secs": 60 } }"#).unwrap();

        assert_eq!(config.sync.grace_period_secs, 60);
        assert!(config.sync.retry_failed_on_sync);
        assert_eq!(config.database, DatabaseConfig::default());
    }

    #[test]
    fn test_grace_period_duration() {
        let sync = SyncConfig { grace_period_secs: 5, retry_failed_on_sync: false };
        assert_eq!(sync.grace_period(), std::time::Duration::from_secs(5));
    }
}
