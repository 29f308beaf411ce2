//! Process-local queue store
//!
//! Same contract as the SQLite store without durability. Used by hosts that
//! run without a writable data directory and by tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use prashiskshan_core::{ApplicationQueueStore, Clock};
use prashiskshan_domain::{
    NewApplication, PrashiskshanError, QueueStatus, QueuedApplication, Result as DomainResult,
};

use super::ids::generate_queue_id;

pub struct InMemoryApplicationQueue {
    records: RwLock<HashMap<String, QueuedApplication>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryApplicationQueue {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { records: RwLock::new(HashMap::new()), clock }
    }
}

#[async_trait]
impl ApplicationQueueStore for InMemoryApplicationQueue {
    async fn add(&self, application: NewApplication) -> DomainResult<String> {
        let now = self.clock.now_millis();
        let mut records = self.records.write();

        let mut id = generate_queue_id(now);
        while records.contains_key(&id) {
            id = generate_queue_id(now);
        }

        records.insert(id.clone(), QueuedApplication::from_new(id.clone(), application, now));
        Ok(id)
    }

    async fn get_all(&self) -> DomainResult<Vec<QueuedApplication>> {
        Ok(self.records.read().values().cloned().collect())
    }

    async fn update_status(&self, id: &str, status: QueueStatus) -> DomainResult<()> {
        let now = self.clock.now_millis();
        let mut records = self.records.write();
        let record = records
            .get_mut(id)
            .ok_or_else(|| PrashiskshanError::NotFound(format!("queued application {id}")))?;
        record.status = status;
        record.status_changed_at = now;
        Ok(())
    }

    async fn remove(&self, id: &str) -> DomainResult<()> {
        self.records.write().remove(id);
        Ok(())
    }

    async fn purge_synced_before(&self, cutoff_millis: i64) -> DomainResult<usize> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|_, record| {
            !(record.status == QueueStatus::Synced && record.status_changed_at < cutoff_millis)
        });
        Ok(before - records.len())
    }
}
