//! Shared fixtures for `prashiskshan-app` integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use prashiskshan_domain::{ApiConfig, Config, DatabaseConfig, SyncConfig};
use prashiskshan_lib::AppContext;
use tempfile::TempDir;

/// Config pointing at a temp database and the given API origin.
pub fn test_config(dir: &TempDir, api_base_url: &str) -> Config {
    Config {
        database: DatabaseConfig { path: db_path(dir).to_string_lossy().to_string(), pool_size: 2 },
        api: ApiConfig { base_url: api_base_url.to_string(), timeout_secs: 2 },
        sync: SyncConfig::default(),
        ..Config::default()
    }
}

pub fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("data").join("queue.db")
}

/// Create a context and keep its directory alive alongside it.
pub async fn create_test_context(api_base_url: &str) -> (AppContext, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let ctx = AppContext::new_with_config(test_config(&dir, api_base_url))
        .await
        .expect("context should initialise");
    (ctx, dir)
}

/// Poll `condition` until it holds or five seconds pass.
pub async fn wait_until<F, Fut>(mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..250 {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    condition().await
}
