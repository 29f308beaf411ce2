//! Integration tests for AppContext lifecycle
//!
//! Startup wiring, crash recovery, expired-record purge and shutdown.

mod support;

use std::sync::Arc;

use prashiskshan_domain::{PrashiskshanError, QueueStatus};
use prashiskshan_infra::DbManager;
use prashiskshan_lib::AppContext;
use support::{create_test_context, db_path, test_config};
use tempfile::TempDir;
use tokio_test::assert_ok;

#[tokio::test(flavor = "multi_thread")]
async fn test_context_creation_succeeds() {
    let (ctx, _dir) = create_test_context("http://127.0.0.1:9").await;

    assert!(ctx.auto_sync_active(), "reconnect syncing should be wired");
    assert!(!ctx.submissions.is_online(), "context starts offline");
    assert!(!ctx.sync_engine.is_syncing());
    assert_eq!(ctx.connectivity.subscriber_count(), 1);
    assert!(ctx.submissions.get_queued_applications().await.expect("list").is_empty());
    assert!(Arc::strong_count(&ctx.db) >= 1);
    ctx.db.health_check().expect("database healthy");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_context_creates_missing_database_directory() {
    let dir = TempDir::new().expect("temp dir");
    assert!(!db_path(&dir).parent().expect("parent").exists());

    let ctx = AppContext::new_with_config(test_config(&dir, "http://127.0.0.1:9"))
        .await
        .expect("context");

    assert!(db_path(&dir).exists());
    ctx.shutdown().await.expect("shutdown");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_startup_recovers_interrupted_and_purges_expired() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::create_dir_all(db_path(&dir).parent().expect("parent")).expect("data dir");
    {
        let db = DbManager::new(db_path(&dir), 1).expect("manager");
        db.run_migrations().expect("migrations");
        db.get_connection()
            .expect("connection")
            .execute_batch(
                "INSERT INTO applications_queue VALUES ('stranded', 'p1', 's1', NULL, 10, 'syncing', 10);
                 INSERT INTO applications_queue VALUES ('expired', 'p2', 's1', NULL, 10, 'synced', 10);
                 INSERT INTO applications_queue VALUES ('waiting', 'p3', 's1', NULL, 20, 'queued', 20);",
            )
            .expect("seed rows");
    }

    let ctx = AppContext::new_with_config(test_config(&dir, "http://127.0.0.1:9"))
        .await
        .expect("context");

    let records = ctx.submissions.get_queued_applications().await.expect("list");
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["stranded", "waiting"]);
    assert_eq!(records[0].status, QueueStatus::Failed);
    assert_eq!(records[1].status, QueueStatus::Queued);

    ctx.shutdown().await.expect("shutdown");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_shutdown_is_idempotent_and_detaches_auto_sync() {
    let (ctx, _dir) = create_test_context("http://127.0.0.1:9").await;

    assert_ok!(ctx.shutdown().await);
    assert_ok!(ctx.shutdown().await);

    assert!(!ctx.auto_sync_active());
    assert_eq!(ctx.connectivity.subscriber_count(), 0);
    assert_eq!(ctx.removal_scheduler.pending(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unopenable_database_is_storage_unavailable() {
    let dir = TempDir::new().expect("temp dir");
    let mut config = test_config(&dir, "http://127.0.0.1:9");
    // A directory where the database file should be.
    std::fs::create_dir_all(&config.database.path).expect("blocking dir");
    config.database.pool_size = 1;

    let result = AppContext::new_with_config(config).await;
    assert!(matches!(result, Err(PrashiskshanError::StorageUnavailable(_))));
}
