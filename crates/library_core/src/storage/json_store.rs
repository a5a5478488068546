//! Flat JSON file backing store.
//!
//! # Responsibility
//! - Map `DatasetStore` onto one pretty-printed JSON file.
//! - Lazily create the file with empty sections on `init_storage`.
//!
//! # Invariants
//! - A missing file reads as empty and is not created by `read`.
//! - `init_storage` never overwrites an existing file.

use super::{DatasetStore, StorageError, StorageResult};
use crate::model::dataset::Dataset;
use log::{debug, error, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name used when no path is configured.
pub const DEFAULT_DATA_FILE: &str = "library_data.json";

const JSON_INDENT: &[u8] = b"    ";

/// `DatasetStore` over a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Binds a store to `path` without touching the filesystem.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Binds a store to `path` and ensures the backing file exists.
    ///
    /// # Side effects
    /// - Creates the file (and missing parent directories) when absent.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let store = Self::new(path);
        store.init_storage()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the backing file with an empty dataset if it does not exist.
    ///
    /// Returns `true` when the file was created by this call.
    pub fn init_storage(&self) -> StorageResult<bool> {
        let exists = self.path.try_exists().map_err(|err| self.io_error(err))?;
        if exists {
            debug!(
                "event=storage_init module=storage status=skip path={}",
                self.path.display()
            );
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        self.write(&Dataset::default())?;
        info!(
            "event=storage_init module=storage status=ok path={}",
            self.path.display()
        );
        Ok(true)
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn encode(dataset: &Dataset) -> StorageResult<Vec<u8>> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
        dataset
            .serialize(&mut serializer)
            .map_err(StorageError::Encode)?;
        Ok(buf)
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl DatasetStore for JsonFileStore {
    fn read(&self) -> StorageResult<Dataset> {
        let started_at = Instant::now();
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=storage_read module=storage status=ok mode=missing path={}",
                    self.path.display()
                );
                return Ok(Dataset::default());
            }
            Err(err) => {
                error!(
                    "event=storage_read module=storage status=error error_code=io_failed path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(self.io_error(err));
            }
        };

        match serde_json::from_slice::<Dataset>(&bytes) {
            Ok(dataset) => {
                debug!(
                    "event=storage_read module=storage status=ok path={} duration_ms={} books={} users={} checkouts={}",
                    self.path.display(),
                    started_at.elapsed().as_millis(),
                    dataset.books.len(),
                    dataset.users.len(),
                    dataset.checkouts.len()
                );
                Ok(dataset)
            }
            Err(err) => {
                error!(
                    "event=storage_read module=storage status=error error_code=malformed path={} error={}",
                    self.path.display(),
                    err
                );
                Err(StorageError::Malformed {
                    path: self.path.clone(),
                    source: err,
                })
            }
        }
    }

    fn write(&self, dataset: &Dataset) -> StorageResult<()> {
        let started_at = Instant::now();
        let bytes = Self::encode(dataset)?;

        if let Err(err) = fs::write(&self.path, bytes) {
            error!(
                "event=storage_write module=storage status=error error_code=io_failed path={} error={}",
                self.path.display(),
                err
            );
            return Err(self.io_error(err));
        }

        debug!(
            "event=storage_write module=storage status=ok path={} duration_ms={}",
            self.path.display(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}
