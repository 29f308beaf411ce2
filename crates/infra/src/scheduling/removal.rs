//! Deferred removal of synced applications
//!
//! Each scheduled removal is one sleeping Tokio task. Removals do not survive
//! a restart; the host purges expired records at startup instead.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use prashiskshan_core::{ApplicationQueueStore, RemovalScheduler};
use prashiskshan_domain::{PrashiskshanError, Result};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Removal scheduler with explicit lifecycle management.
pub struct TokioRemovalScheduler {
    store: Arc<dyn ApplicationQueueStore>,
    runtime: Handle,
    cancellation: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    join_timeout: Duration,
}

impl TokioRemovalScheduler {
    /// Create a scheduler bound to the current Tokio runtime.
    ///
    /// # Errors
    /// `Internal` when called outside a runtime.
    pub fn new(store: Arc<dyn ApplicationQueueStore>) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            PrashiskshanError::Internal(format!("removal scheduler needs a Tokio runtime: {e}"))
        })?;
        Ok(Self::with_handle(store, runtime))
    }

    pub fn with_handle(store: Arc<dyn ApplicationQueueStore>, runtime: Handle) -> Self {
        Self {
            store,
            runtime,
            cancellation: CancellationToken::new(),
            tasks: Mutex::new(Vec::new()),
            join_timeout: Duration::from_secs(5),
        }
    }

    /// Removals still waiting for their timer.
    pub fn pending(&self) -> usize {
        let mut tasks = self.tasks.lock();
        tasks.retain(|handle| !handle.is_finished());
        tasks.len()
    }

    /// Cancel every outstanding timer and wait for the tasks to exit.
    ///
    /// Cancelled records stay in the store until the next startup purge.
    pub async fn shutdown(&self) {
        self.cancellation.cancel();

        let handles: Vec<_> = std::mem::take(&mut *self.tasks.lock());
        let count = handles.len();
        for handle in handles {
            match tokio::time::timeout(self.join_timeout, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(error = %e, "removal task panicked"),
                Err(_) => warn!("removal task did not stop within timeout"),
            }
        }
        info!(cancelled = count, "removal scheduler stopped");
    }
}

impl RemovalScheduler for TokioRemovalScheduler {
    fn schedule_removal(&self, id: &str, delay: Duration) {
        if self.cancellation.is_cancelled() {
            debug!(id, "scheduler stopped, removal not scheduled");
            return;
        }

        let store = Arc::clone(&self.store);
        let cancel = self.cancellation.clone();
        let id = id.to_string();

        let handle = self.runtime.spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    debug!(id = %id, "scheduled removal cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    match store.remove(&id).await {
                        Ok(()) => debug!(id = %id, "synced application removed after grace period"),
                        Err(e) => warn!(id = %id, error = %e, "scheduled removal failed"),
                    }
                }
            }
        });

        let mut tasks = self.tasks.lock();
        tasks.retain(|handle| !handle.is_finished());
        tasks.push(handle);
    }
}

impl Drop for TokioRemovalScheduler {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}
