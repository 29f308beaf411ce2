//! In-memory fakes for core ports

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use prashiskshan_core::{
    ApplicationQueueStore, Clock, ConnectivityCallback, ConnectivityMonitor, RemovalScheduler,
    SubmissionForwarder, Subscription,
};
use prashiskshan_domain::{
    ApplicationSubmission, DeliveryError, NewApplication, PrashiskshanError, QueueStatus,
    QueuedApplication, Result as DomainResult, SubmissionReceipt,
};
use tokio::sync::Notify;

/// Queue store backed by a `HashMap` that records every status write.
#[derive(Default)]
pub struct MockQueueStore {
    records: Mutex<HashMap<String, QueuedApplication>>,
    history: Mutex<Vec<(String, QueueStatus)>>,
    vanished: Mutex<HashSet<String>>,
    fail_reads: AtomicBool,
    next_id: AtomicU64,
    now: AtomicI64,
}

impl MockQueueStore {
    /// Insert a record directly with an explicit status and timestamp.
    pub fn seed(&self, id: &str, project_id: &str, status: QueueStatus, timestamp: i64) {
        self.records.lock().insert(
            id.to_string(),
            QueuedApplication {
                id: id.to_string(),
                project_id: project_id.to_string(),
                student_id: "s1".to_string(),
                cover_letter: None,
                timestamp,
                status,
                status_changed_at: timestamp,
            },
        );
    }

    /// Make `update_status` report `NotFound` for this id from now on.
    pub fn vanish(&self, id: &str) {
        self.vanished.lock().insert(id.to_string());
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn status_of(&self, id: &str) -> Option<QueueStatus> {
        self.records.lock().get(id).map(|record| record.status)
    }

    /// Status writes for one id, in order.
    pub fn history_of(&self, id: &str) -> Vec<QueueStatus> {
        self.history
            .lock()
            .iter()
            .filter(|(record_id, _)| record_id == id)
            .map(|(_, status)| *status)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }
}

#[async_trait]
impl ApplicationQueueStore for MockQueueStore {
    async fn add(&self, application: NewApplication) -> DomainResult<String> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = self.now.fetch_add(1, Ordering::SeqCst);
        let id = format!("queued_{n}");
        let record = QueuedApplication::from_new(id.clone(), application, now);
        self.records.lock().insert(id.clone(), record);
        Ok(id)
    }

    async fn get_all(&self) -> DomainResult<Vec<QueuedApplication>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PrashiskshanError::StorageUnavailable("disk gone".to_string()));
        }
        Ok(self.records.lock().values().cloned().collect())
    }

    async fn update_status(&self, id: &str, status: QueueStatus) -> DomainResult<()> {
        if self.vanished.lock().contains(id) {
            return Err(PrashiskshanError::NotFound(id.to_string()));
        }
        let mut records = self.records.lock();
        let record =
            records.get_mut(id).ok_or_else(|| PrashiskshanError::NotFound(id.to_string()))?;
        record.status = status;
        self.history.lock().push((id.to_string(), status));
        Ok(())
    }

    async fn remove(&self, id: &str) -> DomainResult<()> {
        self.records.lock().remove(id);
        Ok(())
    }

    async fn purge_synced_before(&self, cutoff_millis: i64) -> DomainResult<usize> {
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|_, record| {
            !(record.status == QueueStatus::Synced && record.status_changed_at < cutoff_millis)
        });
        Ok(before - records.len())
    }
}

/// Pauses deliveries until the test releases them.
#[derive(Default)]
pub struct DeliveryGate {
    pub entered: Notify,
    pub release: Notify,
}

/// Forwarder that fails for configured project ids and records every call.
#[derive(Default)]
pub struct MockForwarder {
    failing_projects: Mutex<HashSet<String>>,
    calls: Mutex<Vec<ApplicationSubmission>>,
    remote_id: Option<String>,
    gate: Option<Arc<DeliveryGate>>,
}

impl MockForwarder {
    pub fn with_remote_id(remote_id: &str) -> Self {
        Self { remote_id: Some(remote_id.to_string()), ..Self::default() }
    }

    pub fn gated(gate: Arc<DeliveryGate>) -> Self {
        Self { gate: Some(gate), ..Self::default() }
    }

    pub fn fail_project(&self, project_id: &str) {
        self.failing_projects.lock().insert(project_id.to_string());
    }

    pub fn heal_project(&self, project_id: &str) {
        self.failing_projects.lock().remove(project_id);
    }

    pub fn calls(&self) -> Vec<ApplicationSubmission> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl SubmissionForwarder for MockForwarder {
    async fn submit(
        &self,
        submission: &ApplicationSubmission,
    ) -> std::result::Result<SubmissionReceipt, DeliveryError> {
        self.calls.lock().push(submission.clone());

        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        if self.failing_projects.lock().contains(&submission.project_id) {
            return Err(DeliveryError::Server("HTTP 500".to_string()));
        }
        Ok(SubmissionReceipt { remote_id: self.remote_id.clone() })
    }
}

/// Records scheduled removals without running them.
#[derive(Default)]
pub struct RecordingScheduler {
    scheduled: Mutex<Vec<(String, Duration)>>,
}

impl RecordingScheduler {
    pub fn scheduled(&self) -> Vec<(String, Duration)> {
        self.scheduled.lock().clone()
    }
}

impl RemovalScheduler for RecordingScheduler {
    fn schedule_removal(&self, id: &str, delay: Duration) {
        self.scheduled.lock().push((id.to_string(), delay));
    }
}

pub struct FixedClock(pub AtomicI64);

impl FixedClock {
    pub fn at(millis: i64) -> Self {
        Self(AtomicI64::new(millis))
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Connectivity source driven by the test through [`emit`](Self::emit).
///
/// Unlike the real signal it does not de-duplicate repeated states.
#[derive(Default)]
pub struct MockConnectivity {
    online: AtomicBool,
    callbacks: Arc<Mutex<Vec<(u64, ConnectivityCallback)>>>,
    next_id: AtomicU64,
}

impl MockConnectivity {
    pub fn emit(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
        let callbacks: Vec<ConnectivityCallback> =
            self.callbacks.lock().iter().map(|(_, cb)| Arc::clone(cb)).collect();
        for callback in callbacks {
            callback(online);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.callbacks.lock().len()
    }
}

impl ConnectivityMonitor for MockConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn subscribe(&self, callback: ConnectivityCallback) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.callbacks.lock().push((id, callback));
        let callbacks = Arc::clone(&self.callbacks);
        Subscription::new(move || {
            callbacks.lock().retain(|(existing, _)| *existing != id);
        })
    }
}
