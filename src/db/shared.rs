use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::DataStore;

/// Store shared between sessions behind a single read/write lock
///
/// Writers take the write lock for each mutation. Recommendations run
/// against a [`SharedStore::snapshot`], so a strategy never observes a
/// half-applied write.
#[derive(Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<DataStore>>,
}

impl SharedStore {
    pub fn new(store: DataStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, DataStore> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, DataStore> {
        self.inner.write()
    }

    /// Immutable copy of the current state
    pub fn snapshot(&self) -> Arc<DataStore> {
        Arc::new(self.inner.read().clone())
    }
}
