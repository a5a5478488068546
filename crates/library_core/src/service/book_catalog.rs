//! Book catalog manager.
//!
//! # Responsibility
//! - Keep the book collection in insertion order.
//! - Reject duplicate ISBNs and unknown ISBNs on mutation.
//! - Persist the `books` section after each successful mutation.

use crate::model::book::{Book, BookUpdate};
use crate::model::dataset::DatasetSection;
use crate::service::{EntityKind, ManagerError, ManagerResult};
use crate::storage::DatasetStore;
use log::{debug, info, warn};

/// In-memory book collection synchronized with a `DatasetStore`.
pub struct BookCatalog<'s, S: DatasetStore + ?Sized> {
    store: &'s S,
    books: Vec<Book>,
}

impl<'s, S: DatasetStore + ?Sized> BookCatalog<'s, S> {
    /// Loads the `books` section from `store`.
    ///
    /// # Errors
    /// - Returns `ManagerError::Storage` when the store is unreadable or malformed.
    pub fn load(store: &'s S) -> ManagerResult<Self> {
        let books = store.read()?.books;
        info!(
            "event=catalog_load module=books status=ok count={}",
            books.len()
        );
        Ok(Self { store, books })
    }

    /// Appends `book` unless its ISBN is already catalogued.
    pub fn add(&mut self, book: Book) -> ManagerResult<()> {
        if self.position(&book.isbn).is_some() {
            warn!(
                "event=book_add module=books status=rejected reason=duplicate_isbn isbn={}",
                book.isbn
            );
            return Err(ManagerError::duplicate(EntityKind::Book, book.isbn));
        }

        let isbn = book.isbn.clone();
        self.books.push(book);
        self.persist()?;
        info!("event=book_add module=books status=ok isbn={isbn}");
        Ok(())
    }

    /// Overwrites the supplied fields of the book with `isbn`.
    ///
    /// An update with no fields succeeds without touching storage.
    pub fn update(&mut self, isbn: &str, update: &BookUpdate) -> ManagerResult<()> {
        let Some(index) = self.position(isbn) else {
            warn!("event=book_update module=books status=rejected reason=not_found isbn={isbn}");
            return Err(ManagerError::not_found(EntityKind::Book, isbn));
        };

        if !self.books[index].apply(update) {
            debug!("event=book_update module=books status=noop isbn={isbn}");
            return Ok(());
        }

        self.persist()?;
        info!("event=book_update module=books status=ok isbn={isbn}");
        Ok(())
    }

    /// Removes and returns the first book with `isbn`.
    pub fn delete(&mut self, isbn: &str) -> ManagerResult<Book> {
        let Some(index) = self.position(isbn) else {
            warn!("event=book_delete module=books status=rejected reason=not_found isbn={isbn}");
            return Err(ManagerError::not_found(EntityKind::Book, isbn));
        };

        let removed = self.books.remove(index);
        self.persist()?;
        info!("event=book_delete module=books status=ok isbn={isbn}");
        Ok(removed)
    }

    pub fn find_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.isbn == isbn)
    }

    /// Case-insensitive substring match on author.
    pub fn find_by_author(&self, text: &str) -> Vec<&Book> {
        let needle = text.to_lowercase();
        self.books
            .iter()
            .filter(|book| book.author.to_lowercase().contains(&needle))
            .collect()
    }

    /// Case-insensitive substring match on title.
    pub fn find_by_title(&self, text: &str) -> Vec<&Book> {
        let needle = text.to_lowercase();
        self.books
            .iter()
            .filter(|book| book.title.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn list_all(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn position(&self, isbn: &str) -> Option<usize> {
        self.books.iter().position(|book| book.isbn == isbn)
    }

    fn persist(&self) -> ManagerResult<()> {
        self.store
            .write_section(DatasetSection::Books(&self.books))?;
        debug!(
            "event=books_saved module=books status=ok count={}",
            self.books.len()
        );
        Ok(())
    }
}
