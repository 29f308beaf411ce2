//! Connectivity signal driven by the host platform
//!
//! The host reports the platform's online flag through
//! [`ConnectivitySignal::set_online`]. Subscribers hear about transitions
//! only; repeating the current state is silent. Nothing here polls.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use prashiskshan_core::{ConnectivityCallback, ConnectivityMonitor, Subscription};
use tracing::{debug, info};

type Subscribers = Arc<Mutex<HashMap<u64, ConnectivityCallback>>>;

pub struct ConnectivitySignal {
    online: AtomicBool,
    subscribers: Subscribers,
    next_id: AtomicU64,
}

impl ConnectivitySignal {
    pub fn new(initially_online: bool) -> Self {
        Self {
            online: AtomicBool::new(initially_online),
            subscribers: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Record the platform's current state.
    ///
    /// Returns `true` when this was a transition. Callbacks run on the
    /// calling thread, after the subscriber lock is released, so a callback
    /// may subscribe or unsubscribe.
    pub fn set_online(&self, online: bool) -> bool {
        if self.online.swap(online, Ordering::AcqRel) == online {
            debug!(online, "connectivity unchanged");
            return false;
        }

        info!(online, "connectivity changed");
        let callbacks: Vec<ConnectivityCallback> =
            self.subscribers.lock().values().map(Arc::clone).collect();
        for callback in callbacks {
            callback(online);
        }
        true
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl Default for ConnectivitySignal {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ConnectivityMonitor for ConnectivitySignal {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    fn subscribe(&self, callback: ConnectivityCallback) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.lock().insert(id, callback);

        let subscribers = Arc::downgrade(&self.subscribers);
        Subscription::new(move || {
            if let Some(subscribers) = subscribers.upgrade() {
                subscribers.lock().remove(&id);
            }
        })
    }
}
