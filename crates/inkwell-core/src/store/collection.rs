// ── Reactive resource collection ──
//
// One cached list plus its current item, loading flag, and last error,
// published as a single `watch` value so subscribers never observe a
// half-applied update.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::Identified;

/// Observable state for one resource kind.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    /// Cached list, in server order (or insertion order for local additions).
    pub items: Arc<Vec<T>>,
    /// The item most recently fetched or selected.
    pub current: Option<T>,
    /// `true` while a load for this kind is in flight.
    pub loading: bool,
    /// Message of the most recent recorded failure.
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            current: None,
            loading: false,
            error: None,
        }
    }
}

pub(crate) struct ResourceCollection<T: Clone + Send + Sync + 'static> {
    state: watch::Sender<ResourceState<T>>,
}

impl<T: Clone + Send + Sync + 'static> ResourceCollection<T> {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self { state }
    }

    /// Point-in-time copy of the whole state (the item list is shared).
    pub(crate) fn snapshot(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }

    pub(crate) fn items(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.state.borrow().items)
    }

    pub(crate) fn current(&self) -> Option<T> {
        self.state.borrow().current.clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state.subscribe()
    }

    /// Mark a load as started: clears the error and raises the loading flag.
    /// The flag drops again when the returned guard is finished or dropped.
    pub(crate) fn begin_load(&self) -> LoadGuard<'_, T> {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        LoadGuard {
            collection: self,
            finished: false,
        }
    }

    pub(crate) fn clear_error(&self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    pub(crate) fn set_error(&self, message: String) {
        self.state.send_modify(|s| s.error = Some(message));
    }

    pub(crate) fn set_current(&self, item: Option<T>) {
        self.state.send_modify(|s| s.current = item);
    }

    pub(crate) fn append(&self, item: T) {
        self.state.send_modify(|s| Arc::make_mut(&mut s.items).push(item));
    }

    pub(crate) fn prepend(&self, item: T) {
        self.state
            .send_modify(|s| Arc::make_mut(&mut s.items).insert(0, item));
    }

    /// Reset every field back to its initial value.
    pub(crate) fn clear(&self) {
        self.state.send_replace(ResourceState::default());
    }
}

impl<T: Identified + Clone + Send + Sync + 'static> ResourceCollection<T> {
    /// Replace the first cached item with `id` (and `current`, if it
    /// matches). Returns `false` and leaves the list alone when absent.
    pub(crate) fn replace_by_id(&self, id: i64, item: T) -> bool {
        let mut replaced = false;
        self.state.send_if_modified(|s| {
            let mut changed = false;
            if let Some(pos) = s.items.iter().position(|i| i.id() == id) {
                Arc::make_mut(&mut s.items)[pos] = item.clone();
                replaced = true;
                changed = true;
            }
            if s.current.as_ref().is_some_and(|c| c.id() == id) {
                s.current = Some(item);
                changed = true;
            }
            changed
        });
        replaced
    }

    /// Drop every cached item with `id` and clear a matching `current`.
    /// Returns how many list entries were removed.
    pub(crate) fn remove_by_id(&self, id: i64) -> usize {
        let mut removed = 0;
        self.state.send_if_modified(|s| {
            let before = s.items.len();
            if s.items.iter().any(|i| i.id() == id) {
                Arc::make_mut(&mut s.items).retain(|i| i.id() != id);
            }
            removed = before - s.items.len();
            let current_matches = s.current.as_ref().is_some_and(|c| c.id() == id);
            if current_matches {
                s.current = None;
            }
            removed > 0 || current_matches
        });
        removed
    }
}

/// Holds a collection's loading flag up until the load resolves.
pub(crate) struct LoadGuard<'a, T: Clone + Send + Sync + 'static> {
    collection: &'a ResourceCollection<T>,
    finished: bool,
}

impl<T: Clone + Send + Sync + 'static> LoadGuard<'_, T> {
    /// Apply the loaded data and lower the flag in one notification.
    pub(crate) fn succeed(mut self, apply: impl FnOnce(&mut ResourceState<T>)) {
        self.collection.state.send_modify(|s| {
            apply(s);
            s.loading = false;
        });
        self.finished = true;
    }

    /// Record the failure message and lower the flag in one notification.
    pub(crate) fn fail(mut self, message: String) {
        self.collection.state.send_modify(|s| {
            s.error = Some(message);
            s.loading = false;
        });
        self.finished = true;
    }
}

impl<T: Clone + Send + Sync + 'static> Drop for LoadGuard<'_, T> {
    fn drop(&mut self) {
        if !self.finished {
            self.collection.state.send_modify(|s| s.loading = false);
        }
    }
}
