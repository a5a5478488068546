//! Catalog managers.
//!
//! # Responsibility
//! - Own the in-memory collections for books, users, and checkouts.
//! - Enforce unique keys and the one-active-checkout-per-book rule.
//! - Persist the owning section after every successful mutation.
//!
//! # Invariants
//! - Rejected operations (`DuplicateKey`, `NotFound`) change neither memory
//!   nor persisted state.
//! - Managers never call each other; referential integrity between
//!   checkouts and books/users is not enforced.

use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod book_catalog;
pub mod checkout_ledger;
pub mod user_directory;

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Entity family a manager error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Book,
    User,
    Checkout,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Book => "book",
            Self::User => "user",
            Self::Checkout => "checkout",
        };
        f.write_str(name)
    }
}

/// Manager-level failure.
///
/// `DuplicateKey`, `NotFound` and `DueDateOutOfRange` are recoverable
/// rejections; `Storage` is fatal and may leave memory and disk out of sync.
#[derive(Debug)]
pub enum ManagerError {
    DuplicateKey { entity: EntityKind, key: String },
    NotFound { entity: EntityKind, key: String },
    /// Default due date does not fit the calendar range.
    DueDateOutOfRange { isbn: String },
    Storage(StorageError),
}

impl ManagerError {
    pub(crate) fn duplicate(entity: EntityKind, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            entity,
            key: key.into(),
        }
    }

    pub(crate) fn not_found(entity: EntityKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Returns whether the operation was rejected without side effects.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

impl Display for ManagerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey {
                entity: EntityKind::Checkout,
                key,
            } => write!(f, "book already checked out: {key}"),
            Self::DuplicateKey { entity, key } => write!(f, "duplicate {entity} key: {key}"),
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::DueDateOutOfRange { isbn } => {
                write!(f, "loan period pushes due date out of range for book: {isbn}")
            }
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ManagerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::DuplicateKey { .. } | Self::NotFound { .. } | Self::DueDateOutOfRange { .. } => {
                None
            }
        }
    }
}

impl From<StorageError> for ManagerError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}
