//! Shared test helpers for `prashiskshan-core` integration tests.
//!
//! These helpers provide in-memory fakes for every core port so that tests
//! can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fakes;

use std::sync::Arc;
use std::time::Duration;

use prashiskshan_core::SyncEngine;
use prashiskshan_domain::SyncConfig;

pub use fakes::{
    DeliveryGate, FixedClock, MockConnectivity, MockForwarder, MockQueueStore, RecordingScheduler,
};

pub const GRACE: Duration = Duration::from_secs(24 * 60 * 60);

/// Everything needed to exercise a [`SyncEngine`].
pub struct Harness {
    pub store: Arc<MockQueueStore>,
    pub forwarder: Arc<MockForwarder>,
    pub scheduler: Arc<RecordingScheduler>,
    pub engine: Arc<SyncEngine>,
}

pub fn harness(retry_failed_on_sync: bool) -> Harness {
    harness_with(Arc::new(MockForwarder::default()), retry_failed_on_sync)
}

pub fn harness_with(forwarder: Arc<MockForwarder>, retry_failed_on_sync: bool) -> Harness {
    let store = Arc::new(MockQueueStore::default());
    let scheduler = Arc::new(RecordingScheduler::default());
    let engine = Arc::new(SyncEngine::new(
        store.clone(),
        forwarder.clone(),
        scheduler.clone(),
        SyncConfig { grace_period_secs: GRACE.as_secs(), retry_failed_on_sync },
    ));
    Harness { store, forwarder, scheduler, engine }
}

/// Poll `condition` until it holds or two seconds pass.
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
