//! Offline submission façade
//!
//! Entry point for the UI host: queue applications, inspect the queue and
//! drive syncing. Holds no state of its own beyond the collaborators.

use std::sync::Arc;

use prashiskshan_domain::{
    NewApplication, PrashiskshanError, QueueSummary, QueuedApplication, Result,
};
use tracing::{debug, error, info, instrument};

use crate::connectivity::ports::{ConnectivityCallback, ConnectivityMonitor, Subscription};
use crate::queue::ports::{ApplicationQueueStore, Clock};
use crate::sync::SyncEngine;

/// Public API over the offline application queue.
pub struct OfflineSubmissionService {
    store: Arc<dyn ApplicationQueueStore>,
    monitor: Arc<dyn ConnectivityMonitor>,
    engine: Arc<SyncEngine>,
    clock: Arc<dyn Clock>,
}

impl OfflineSubmissionService {
    pub fn new(
        store: Arc<dyn ApplicationQueueStore>,
        monitor: Arc<dyn ConnectivityMonitor>,
        engine: Arc<SyncEngine>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, monitor, engine, clock }
    }

    /// Queue an application for later delivery and return its local id.
    ///
    /// Works regardless of connectivity.
    ///
    /// # Errors
    /// `InvalidInput` for a blank project or student id, or the store's
    /// `StorageUnavailable`.
    #[instrument(skip(self, cover_letter))]
    pub async fn queue_application(
        &self,
        project_id: &str,
        student_id: &str,
        cover_letter: Option<&str>,
    ) -> Result<String> {
        if project_id.trim().is_empty() {
            return Err(PrashiskshanError::InvalidInput("project_id is required".to_string()));
        }
        if student_id.trim().is_empty() {
            return Err(PrashiskshanError::InvalidInput("student_id is required".to_string()));
        }

        let application =
            NewApplication::new(project_id, student_id, cover_letter.map(str::to_string));
        let id = self.store.add(application).await?;
        info!(id = %id, "application queued for offline submission");
        Ok(id)
    }

    /// Every record currently in the queue, oldest first.
    pub async fn get_queued_applications(&self) -> Result<Vec<QueuedApplication>> {
        let mut records = self.store.get_all().await?;
        records.sort_by_key(|record| record.timestamp);
        Ok(records)
    }

    /// Run a sync pass now. Returns the records delivered in this pass.
    pub async fn trigger_sync(&self) -> Result<Vec<QueuedApplication>> {
        self.engine.sync_all().await
    }

    pub fn is_online(&self) -> bool {
        self.monitor.is_online()
    }

    /// Subscribe to connectivity changes.
    ///
    /// `callback` receives every transition. In addition, each transition to
    /// online starts one sync pass on the Tokio runtime that is current when
    /// this method is called. Outside a runtime the callback is still
    /// registered but no passes are started.
    pub fn on_connectivity_change(&self, callback: ConnectivityCallback) -> Subscription {
        let runtime = tokio::runtime::Handle::try_current().ok();
        if runtime.is_none() {
            debug!("no Tokio runtime at subscribe time; online transitions will not sync");
        }

        let engine = Arc::clone(&self.engine);
        let forward: ConnectivityCallback = Arc::new(move |online: bool| {
            callback(online);
            if !online {
                return;
            }
            if let Some(handle) = &runtime {
                let engine = Arc::clone(&engine);
                handle.spawn(async move {
                    if let Err(err) = engine.sync_all().await {
                        error!(error = %err, "sync after reconnect failed");
                    }
                });
            }
        });

        self.monitor.subscribe(forward)
    }

    /// Counts per status.
    pub async fn queue_summary(&self) -> Result<QueueSummary> {
        let records = self.store.get_all().await?;
        Ok(QueueSummary::from_records(&records))
    }

    /// Make every `failed` record eligible for the next pass.
    pub async fn retry_failed(&self) -> Result<usize> {
        let count = self.engine.requeue_failed().await?;
        info!(count, "failed applications re-queued");
        Ok(count)
    }

    /// Delete `synced` records older than the grace period.
    ///
    /// Covers removals that were scheduled before a restart and therefore
    /// never fired.
    pub async fn purge_expired(&self) -> Result<usize> {
        let grace_millis = i64::try_from(self.engine.grace_period().as_millis()).unwrap_or(i64::MAX);
        let cutoff = self.clock.now_millis().saturating_sub(grace_millis);
        let purged = self.store.purge_synced_before(cutoff).await?;
        if purged > 0 {
            info!(purged, "expired synced applications purged");
        }
        Ok(purged)
    }
}
