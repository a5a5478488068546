//! Dataset persistence contracts and implementations.
//!
//! # Responsibility
//! - Read and write the whole catalog `Dataset` as one unit.
//! - Provide per-section writes that merge with the rest of persisted state,
//!   so independent managers never clobber each other's sections.
//!
//! # Invariants
//! - `write` always replaces persisted content entirely.
//! - An absent backing store reads as an empty `Dataset`.
//! - Persisted content that does not match the `Dataset` shape is rejected
//!   on read instead of being skipped.

use crate::model::dataset::{Dataset, DatasetSection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_store;
mod memory;

pub use json_store::{JsonFileStore, DEFAULT_DATA_FILE};
pub use memory::MemoryStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Fatal persistence failure. Callers are not expected to recover.
#[derive(Debug)]
pub enum StorageError {
    /// Backing file could not be read, created, or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Backing file content is not a valid dataset.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Dataset could not be serialized.
    Encode(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "storage unavailable at `{}`: {source}", path.display())
            }
            Self::Malformed { path, source } => {
                write!(f, "malformed dataset in `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode dataset: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Whole-dataset persistence contract shared by all catalog managers.
pub trait DatasetStore {
    /// Returns persisted state, or an empty dataset if nothing is stored yet.
    fn read(&self) -> StorageResult<Dataset>;

    /// Overwrites persisted state with `dataset`.
    fn write(&self, dataset: &Dataset) -> StorageResult<()>;

    /// Replaces one section and persists the complete merged dataset.
    fn write_section(&self, section: DatasetSection<'_>) -> StorageResult<()> {
        let mut dataset = self.read()?;
        section.merge_into(&mut dataset);
        self.write(&dataset)
    }
}
