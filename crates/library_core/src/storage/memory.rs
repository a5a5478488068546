//! Process-local store with no file I/O.

use super::{DatasetStore, StorageResult};
use crate::model::dataset::Dataset;
use std::cell::{Cell, RefCell};

/// In-memory `DatasetStore`, useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    dataset: RefCell<Dataset>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store as if `dataset` had already been persisted.
    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            dataset: RefCell::new(dataset),
            writes: Cell::new(0),
        }
    }

    /// Number of completed `write` calls.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl DatasetStore for MemoryStore {
    fn read(&self) -> StorageResult<Dataset> {
        Ok(self.dataset.borrow().clone())
    }

    fn write(&self, dataset: &Dataset) -> StorageResult<()> {
        *self.dataset.borrow_mut() = dataset.clone();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
