//! Book record and partial-update request.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A catalogued book, keyed by `isbn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    /// Unique key. Format is not validated.
    pub isbn: String,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
        }
    }

    /// Applies supplied fields in place. Returns whether anything was supplied.
    pub(crate) fn apply(&mut self, update: &BookUpdate) -> bool {
        let mut touched = false;
        if let Some(title) = &update.title {
            self.title = title.clone();
            touched = true;
        }
        if let Some(author) = &update.author {
            self.author = author.clone();
            touched = true;
        }
        touched
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {}, ISBN: {}", self.title, self.author, self.isbn)
    }
}

/// Field-level patch for `BookCatalog::update`.
///
/// `None` leaves a field unchanged; `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl BookUpdate {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}
