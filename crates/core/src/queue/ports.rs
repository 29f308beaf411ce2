//! Port interfaces for the offline application queue

use async_trait::async_trait;
use prashiskshan_domain::{NewApplication, QueueStatus, QueuedApplication, Result};

/// Durable store for queued applications.
///
/// The store exclusively owns persisted records. Each method is a single
/// atomic operation; callers re-read with [`get_all`](Self::get_all) rather
/// than holding records across passes.
#[async_trait]
pub trait ApplicationQueueStore: Send + Sync {
    /// Persist a new record in state `queued` and return its generated id.
    ///
    /// # Errors
    /// `StorageUnavailable` when the backing store cannot be opened or
    /// written.
    async fn add(&self, application: NewApplication) -> Result<String>;

    /// All records in unspecified order. An empty store yields an empty list.
    async fn get_all(&self) -> Result<Vec<QueuedApplication>>;

    /// Overwrite the status of one record and stamp `status_changed_at`.
    ///
    /// # Errors
    /// `NotFound` when no record has this id.
    async fn update_status(&self, id: &str, status: QueueStatus) -> Result<()>;

    /// Delete one record. Removing an unknown id succeeds.
    async fn remove(&self, id: &str) -> Result<()>;

    /// Delete `synced` records whose last status change is older than
    /// `cutoff_millis`. Returns the number of deleted records.
    async fn purge_synced_before(&self, cutoff_millis: i64) -> Result<usize>;
}

/// Wall-clock source in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}
