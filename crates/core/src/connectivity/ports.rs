//! Port interfaces for connectivity observation
//!
//! Connectivity is an advisory hint from the host platform. Being "online"
//! does not guarantee the remote endpoint is reachable; the sync engine
//! still handles delivery failures per item.

use std::fmt;
use std::sync::Arc;

/// Callback invoked with the new online state on each transition.
pub type ConnectivityCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Source of online/offline transitions.
pub trait ConnectivityMonitor: Send + Sync {
    /// Current state as last reported by the platform.
    fn is_online(&self) -> bool;

    /// Register a callback for state transitions.
    ///
    /// The callback fires once per real transition, never for a repeated
    /// report of the same state. It stops firing once the returned
    /// [`Subscription`] is unsubscribed or dropped.
    fn subscribe(&self, callback: ConnectivityCallback) -> Subscription;
}

/// Handle for a registered connectivity callback.
///
/// Dropping the handle unsubscribes. Hold it for as long as notifications
/// are wanted.
#[must_use = "dropping a Subscription unsubscribes the callback immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Wrap the action that detaches the callback from its source.
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// A subscription with nothing to detach.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    /// Stop receiving notifications. Calling this more than once is a no-op.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.is_active()).finish()
    }
}
