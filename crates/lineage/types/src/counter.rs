use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// A global event index. Signed so that a counter still at zero records -1.
pub type EventIndex = i64;

/// Source of global event indices.
///
/// The counter is advanced by whatever action triggers a recording, before
/// the tracker reads it. The tracker therefore logs `current_index() - 1`.
pub trait EventCounter {
    /// Current value of the counter. Must be monotonically non-decreasing.
    fn current_index(&self) -> EventIndex;
}

/// Atomically incremented counter shared between all of its clones.
#[derive(Clone, Debug, Default)]
pub struct SharedEventCounter {
    inner: Arc<AtomicI64>,
}

impl SharedEventCounter {
    /// Counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter starting at an arbitrary index.
    pub fn starting_at(index: EventIndex) -> Self {
        Self {
            inner: Arc::new(AtomicI64::new(index)),
        }
    }

    /// Advance the counter by one and return the new value.
    pub fn advance(&self) -> EventIndex {
        self.inner.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Advance the counter by `n`, returning the new value.
    pub fn advance_by(&self, n: EventIndex) -> EventIndex {
        self.inner.fetch_add(n, Ordering::SeqCst) + n
    }
}

impl EventCounter for SharedEventCounter {
    fn current_index(&self) -> EventIndex {
        self.inner.load(Ordering::SeqCst)
    }
}

impl<C: EventCounter + ?Sized> EventCounter for &C {
    fn current_index(&self) -> EventIndex {
        (**self).current_index()
    }
}

impl<C: EventCounter + ?Sized> EventCounter for Arc<C> {
    fn current_index(&self) -> EventIndex {
        (**self).current_index()
    }
}
