//! SQLite-backed implementation of the application queue port.
//!
//! Every port method runs one statement on Tokio's blocking pool. There is no
//! in-memory cache: each call reads or writes the file directly, so records
//! survive a restart as soon as the call returns.

use std::sync::Arc;

use async_trait::async_trait;
use prashiskshan_core::{ApplicationQueueStore, Clock};
use prashiskshan_domain::{
    NewApplication, PrashiskshanError, QueueStatus, QueuedApplication, Result as DomainResult,
};
use rusqlite::{params, Row};
use tokio::task;
use tracing::{debug, warn};

use super::manager::DbManager;
use crate::errors::InfraError;
use crate::queue::generate_queue_id;

/// SQLite-backed application queue.
pub struct SqliteApplicationQueueRepository {
    db: Arc<DbManager>,
    clock: Arc<dyn Clock>,
}

impl SqliteApplicationQueueRepository {
    /// Construct a repository backed by the shared manager.
    ///
    /// The schema must already exist; see [`DbManager::run_migrations`].
    pub fn new(db: Arc<DbManager>, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }
}

#[async_trait]
impl ApplicationQueueStore for SqliteApplicationQueueRepository {
    async fn add(&self, application: NewApplication) -> DomainResult<String> {
        let db = Arc::clone(&self.db);
        let now = self.clock.now_millis();
        let record = QueuedApplication::from_new(generate_queue_id(now), application, now);

        task::spawn_blocking(move || -> DomainResult<String> {
            let conn = db.get_connection()?;
            conn.execute(
                INSERT_SQL,
                params![
                    record.id,
                    record.project_id,
                    record.student_id,
                    record.cover_letter,
                    record.timestamp,
                    record.status.as_str(),
                    record.status_changed_at,
                ],
            )
            .map_err(map_sql_error)?;
            debug!(id = %record.id, "application row inserted");
            Ok(record.id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_all(&self) -> DomainResult<Vec<QueuedApplication>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<QueuedApplication>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(SELECT_ALL_SQL).map_err(map_sql_error)?;
            let rows = stmt.query_map([], map_queue_row).map_err(map_sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update_status(&self, id: &str, status: QueueStatus) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        let now = self.clock.now_millis();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(UPDATE_STATUS_SQL, params![status.as_str(), now, id])
                .map_err(map_sql_error)?;
            if changed == 0 {
                return Err(PrashiskshanError::NotFound(format!("queued application {id}")));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn remove(&self, id: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute("DELETE FROM applications_queue WHERE id = ?1", params![id])
                .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn purge_synced_before(&self, cutoff_millis: i64) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<usize> {
            let conn = db.get_connection()?;
            conn.execute(
                "DELETE FROM applications_queue WHERE status = ?1 AND status_changed_at < ?2",
                params![QueueStatus::Synced.as_str(), cutoff_millis],
            )
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

const INSERT_SQL: &str = "INSERT INTO applications_queue (
        id, project_id, student_id, cover_letter, timestamp, status, status_changed_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

const SELECT_ALL_SQL: &str = "SELECT
        id, project_id, student_id, cover_letter, timestamp, status, status_changed_at
    FROM applications_queue
    ORDER BY timestamp ASC";

const UPDATE_STATUS_SQL: &str =
    "UPDATE applications_queue SET status = ?1, status_changed_at = ?2 WHERE id = ?3";

fn map_queue_row(row: &Row<'_>) -> rusqlite::Result<QueuedApplication> {
    let id: String = row.get(0)?;
    let status_raw: String = row.get(5)?;
    let status = parse_status(&id, &status_raw);

    Ok(QueuedApplication {
        id,
        project_id: row.get(1)?,
        student_id: row.get(2)?,
        cover_letter: row.get(3)?,
        timestamp: row.get(4)?,
        status,
        status_changed_at: row.get(6)?,
    })
}

fn parse_status(id: &str, raw: &str) -> QueueStatus {
    match raw.parse::<QueueStatus>() {
        Ok(status) => status,
        Err(err) => {
            warn!(
                id = %id,
                raw_status = %raw,
                error = %err,
                "invalid queue status in sqlite, treating as failed"
            );
            QueueStatus::Failed
        }
    }
}

fn map_sql_error(err: rusqlite::Error) -> PrashiskshanError {
    PrashiskshanError::from(InfraError::from(err))
}

fn map_join_error(err: task::JoinError) -> PrashiskshanError {
    if err.is_cancelled() {
        PrashiskshanError::Internal("queue task cancelled".into())
    } else {
        PrashiskshanError::Internal(format!("queue task panic: {err}"))
    }
}
