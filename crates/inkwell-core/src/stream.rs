// ── Reactive resource streams ──
//
// Subscription handle for consuming store changes.

use tokio::sync::watch;

use crate::store::ResourceState;

/// A subscription to one resource kind's state.
///
/// Provides point-in-time access and change notification via `changed()`.
pub struct ResourceStream<T: Clone + Send + Sync + 'static> {
    current: ResourceState<T>,
    receiver: watch::Receiver<ResourceState<T>>,
}

impl<T: Clone + Send + Sync + 'static> ResourceStream<T> {
    pub(crate) fn new(mut receiver: watch::Receiver<ResourceState<T>>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// State captured at creation or at the last `changed()`.
    pub fn current(&self) -> &ResourceState<T> {
        &self.current
    }

    /// Latest state, which may be newer than `current()`.
    pub fn latest(&self) -> ResourceState<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change. Returns `None` once the store is dropped.
    pub async fn changed(&mut self) -> Option<ResourceState<T>> {
        self.receiver.changed().await.ok()?;
        let state = self.receiver.borrow_and_update().clone();
        self.current = state.clone();
        Some(state)
    }
}
