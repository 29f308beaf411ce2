//! Shared fixtures for `prashiskshan-infra` integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use prashiskshan_infra::clock::SystemClock;
use prashiskshan_infra::database::{DbManager, SqliteApplicationQueueRepository};
use tempfile::TempDir;

/// Temporary queue database that keeps its directory alive for the test.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    pub path: PathBuf,
    _temp_dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let path = temp_dir.path().join("queue.db");
        let manager = open(&path);
        Self { manager, path, _temp_dir: temp_dir }
    }

    pub fn repository(&self) -> SqliteApplicationQueueRepository {
        SqliteApplicationQueueRepository::new(Arc::clone(&self.manager), Arc::new(SystemClock))
    }

    /// A second manager on the same file, as a fresh process would open it.
    pub fn reopen(&self) -> SqliteApplicationQueueRepository {
        SqliteApplicationQueueRepository::new(open(&self.path), Arc::new(SystemClock))
    }

    pub fn execute_batch(&self, sql: &str) {
        let conn = self.manager.get_connection().expect("connection for execute_batch");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

fn open(path: &std::path::Path) -> Arc<DbManager> {
    let manager = DbManager::new(path, 2).expect("db manager should be created");
    manager.run_migrations().expect("schema migrations should apply");
    Arc::new(manager)
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
