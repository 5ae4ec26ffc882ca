use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use quill_core::Note;

use crate::index::DerivedIndex;

/// Holds at most one generation of the derived index.
///
/// Readers get an `Arc` snapshot. A missing index is built outside the lock
/// and published only if the slot is still empty, so a reader never sees a
/// partially built index.
#[derive(Debug, Default)]
pub struct IndexCache {
    slot: RwLock<Option<Arc<DerivedIndex>>>,
    builds: AtomicU64,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached generation. The next [`get`](Self::get) rebuilds.
    pub fn invalidate(&self) {
        if self.slot.write().take().is_some() {
            tracing::trace!("Derived note index invalidated");
        }
    }

    /// The cached index, building it from `notes` first if absent.
    pub fn get(&self, notes: &[Note]) -> Arc<DerivedIndex> {
        if let Some(index) = self.slot.read().as_ref() {
            return Arc::clone(index);
        }

        let built = Arc::new(DerivedIndex::build(notes));
        self.builds.fetch_add(1, Ordering::Relaxed);

        let mut slot = self.slot.write();
        match slot.as_ref() {
            Some(published) => Arc::clone(published),
            None => {
                *slot = Some(Arc::clone(&built));
                built
            }
        }
    }

    pub fn is_cached(&self) -> bool {
        self.slot.read().is_some()
    }

    /// How many times an index has been built by this cache.
    pub fn build_count(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }
}
