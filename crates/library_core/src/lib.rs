//! Core catalog logic for the library manager.
//! Books, users, and checkouts are held in memory and persisted to one JSON file.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use config::{ConfigError, LibraryConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Book, BookUpdate};
pub use model::checkout::{CheckoutRecord, OverdueEntry};
pub use model::dataset::{Dataset, DatasetSection};
pub use model::user::{User, UserUpdate};
pub use service::book_catalog::BookCatalog;
pub use service::checkout_ledger::{local_now, CheckoutLedger, LoanPolicy};
pub use service::user_directory::UserDirectory;
pub use service::{EntityKind, ManagerError, ManagerResult};
pub use storage::{DatasetStore, JsonFileStore, MemoryStore, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
