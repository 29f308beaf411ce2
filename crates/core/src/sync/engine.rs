//! Sync engine - drains the offline queue
//!
//! One pass reads every record, delivers the `queued` ones sequentially and
//! records each outcome in the store. Delivered records are handed to the
//! [`RemovalScheduler`] and deleted after the grace period; failed records
//! stay in the store.
//!
//! Delivery failures are absorbed per item. Storage failures abort the pass
//! because the queue can no longer be trusted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use prashiskshan_domain::{
    ApplicationSubmission, PrashiskshanError, QueueStatus, QueuedApplication, Result, SyncConfig,
};
use tracing::{debug, info, instrument, warn};

use super::ports::{RemovalScheduler, SubmissionForwarder};
use crate::queue::ports::ApplicationQueueStore;

/// Drains queued applications to the remote endpoint.
pub struct SyncEngine {
    store: Arc<dyn ApplicationQueueStore>,
    forwarder: Arc<dyn SubmissionForwarder>,
    scheduler: Arc<dyn RemovalScheduler>,
    config: SyncConfig,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the pass ends, including on early return.
struct PassGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PassGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

enum ItemOutcome {
    Synced(QueuedApplication),
    Failed,
    Skipped,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(
        store: Arc<dyn ApplicationQueueStore>,
        forwarder: Arc<dyn SubmissionForwarder>,
        scheduler: Arc<dyn RemovalScheduler>,
        config: SyncConfig,
    ) -> Self {
        Self { store, forwarder, scheduler, config, in_flight: AtomicBool::new(false) }
    }

    /// Whether a pass is currently running.
    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn grace_period(&self) -> Duration {
        self.config.grace_period()
    }

    /// Run one sync pass and return the records delivered in it.
    ///
    /// A call made while another pass is running returns an empty list
    /// without touching the store.
    ///
    /// # Errors
    /// Propagates storage errors from reading or updating the queue. A
    /// delivery failure only marks that record `failed`.
    #[instrument(skip(self))]
    pub async fn sync_all(&self) -> Result<Vec<QueuedApplication>> {
        let Some(_guard) = PassGuard::acquire(&self.in_flight) else {
            debug!("sync pass already running, skipping");
            return Ok(Vec::new());
        };

        if self.config.retry_failed_on_sync {
            let requeued = self.requeue_failed().await?;
            if requeued > 0 {
                debug!(requeued, "failed applications re-queued for this pass");
            }
        }

        let mut pending: Vec<QueuedApplication> = self
            .store
            .get_all()
            .await?
            .into_iter()
            .filter(|record| record.status.can_transition_to(QueueStatus::Syncing))
            .collect();

        if pending.is_empty() {
            debug!("no queued applications to sync");
            return Ok(Vec::new());
        }

        // Oldest first; the store makes no ordering promise.
        pending.sort_by_key(|record| record.timestamp);

        let total = pending.len();
        let mut synced = Vec::new();
        let mut failed = 0usize;

        for record in pending {
            match self.sync_one(record).await? {
                ItemOutcome::Synced(record) => synced.push(record),
                ItemOutcome::Failed => failed += 1,
                ItemOutcome::Skipped => {}
            }
        }

        info!(total, synced = synced.len(), failed, "sync pass complete");
        Ok(synced)
    }

    /// Reset every `failed` record to `queued`. Returns how many were reset.
    ///
    /// # Errors
    /// Propagates storage errors.
    pub async fn requeue_failed(&self) -> Result<usize> {
        let failed = self
            .store
            .get_all()
            .await?
            .into_iter()
            .filter(|record| record.status == QueueStatus::Failed);

        let mut count = 0;
        for mut record in failed {
            if self.transition(&mut record, QueueStatus::Queued).await? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Mark records left in `syncing` by an interrupted pass as `failed`.
    ///
    /// Must only run while no pass is active, typically once at startup.
    ///
    /// # Errors
    /// Propagates storage errors.
    pub async fn recover_interrupted(&self) -> Result<usize> {
        let Some(_guard) = PassGuard::acquire(&self.in_flight) else {
            return Ok(0);
        };

        let stranded = self
            .store
            .get_all()
            .await?
            .into_iter()
            .filter(|record| record.status == QueueStatus::Syncing);

        let mut count = 0;
        for mut record in stranded {
            if self.transition(&mut record, QueueStatus::Failed).await? {
                count += 1;
            }
        }
        if count > 0 {
            warn!(count, "recovered applications interrupted mid-delivery");
        }
        Ok(count)
    }

    async fn sync_one(&self, mut record: QueuedApplication) -> Result<ItemOutcome> {
        if !self.transition(&mut record, QueueStatus::Syncing).await? {
            return Ok(ItemOutcome::Skipped);
        }

        let submission = ApplicationSubmission::from_queued(&record);
        match self.forwarder.submit(&submission).await {
            Ok(receipt) => {
                if !self.transition(&mut record, QueueStatus::Synced).await? {
                    return Ok(ItemOutcome::Skipped);
                }
                self.scheduler.schedule_removal(&record.id, self.config.grace_period());
                debug!(
                    id = %record.id,
                    remote_id = receipt.remote_id.as_deref().unwrap_or("-"),
                    "application synced"
                );
                Ok(ItemOutcome::Synced(record))
            }
            Err(err) => {
                warn!(
                    id = %record.id,
                    error_kind = err.label(),
                    error = %err,
                    "application delivery failed"
                );
                if !self.transition(&mut record, QueueStatus::Failed).await? {
                    return Ok(ItemOutcome::Skipped);
                }
                Ok(ItemOutcome::Failed)
            }
        }
    }

    /// Persist `record` moving to `next` and mirror it on the local copy.
    ///
    /// Returns `false` without touching the store when `next` is not a
    /// lifecycle edge from the record's current status, and `false` when the
    /// record vanished from the store.
    async fn transition(&self, record: &mut QueuedApplication, next: QueueStatus) -> Result<bool> {
        if !record.status.can_transition_to(next) {
            warn!(
                id = %record.id,
                from = %record.status,
                to = %next,
                "refusing queue status change outside the lifecycle"
            );
            return Ok(false);
        }

        match self.store.update_status(&record.id, next).await {
            Ok(()) => {
                record.status = next;
                Ok(true)
            }
            Err(PrashiskshanError::NotFound(_)) => {
                warn!(id = %record.id, status = %next, "application disappeared from queue, skipping");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}
