//! The persisted unit: every section of catalog state together.

use crate::model::book::Book;
use crate::model::checkout::CheckoutRecord;
use crate::model::user::User;
use serde::{Deserialize, Serialize};

/// Full catalog state as stored in the backing file.
///
/// Sections missing from persisted content load as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub checkouts: Vec<CheckoutRecord>,
}

/// One section of the dataset, borrowed from a manager's in-memory state.
#[derive(Debug, Clone, Copy)]
pub enum DatasetSection<'a> {
    Books(&'a [Book]),
    Users(&'a [User]),
    Checkouts(&'a [CheckoutRecord]),
}

impl DatasetSection<'_> {
    /// Replaces the matching section of `dataset`, leaving the others intact.
    pub fn merge_into(&self, dataset: &mut Dataset) {
        match self {
            Self::Books(items) => dataset.books = items.to_vec(),
            Self::Users(items) => dataset.users = items.to_vec(),
            Self::Checkouts(items) => dataset.checkouts = items.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Dataset, DatasetSection};
    use crate::model::book::Book;
    use crate::model::user::User;

    #[test]
    fn missing_sections_default_to_empty() {
        let dataset: Dataset =
            serde_json::from_str(r#"{"users":[{"name":"Ada","user_id":"u1"}]}"#).unwrap();
        assert!(dataset.books.is_empty());
        assert!(dataset.checkouts.is_empty());
        assert_eq!(dataset.users, vec![User::new("Ada", "u1")]);
    }

    #[test]
    fn merge_replaces_only_target_section() {
        let mut dataset = Dataset {
            users: vec![User::new("Ada", "u1")],
            ..Dataset::default()
        };
        let books = vec![Book::new("Dune", "Frank Herbert", "1")];

        DatasetSection::Books(&books).merge_into(&mut dataset);

        assert_eq!(dataset.books, books);
        assert_eq!(dataset.users, vec![User::new("Ada", "u1")]);
    }
}
