use library_core::{
    Book, BookCatalog, BookUpdate, EntityKind, ManagerError, MemoryStore, User, UserDirectory,
    UserUpdate,
};

#[test]
fn add_then_find_returns_equal_book() {
    let store = MemoryStore::new();
    let mut catalog = BookCatalog::load(&store).unwrap();
    let book = Book::new("The Left Hand of Darkness", "Ursula K. Le Guin", "978-0441478125");

    catalog.add(book.clone()).unwrap();

    assert_eq!(catalog.find_by_isbn("978-0441478125"), Some(&book));
}

#[test]
fn second_add_with_same_isbn_fails_and_keeps_size() {
    let store = MemoryStore::new();
    let mut catalog = BookCatalog::load(&store).unwrap();
    catalog.add(Book::new("Dune", "Frank Herbert", "111")).unwrap();

    let err = catalog
        .add(Book::new("Dune Messiah", "Frank Herbert", "111"))
        .unwrap_err();

    assert!(err.is_recoverable());
    assert!(matches!(
        err,
        ManagerError::DuplicateKey {
            entity: EntityKind::Book,
            ..
        }
    ));
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.find_by_isbn("111").unwrap().title, "Dune");
}

#[test]
fn delete_missing_fails_and_present_succeeds() {
    let store = MemoryStore::new();
    let mut catalog = BookCatalog::load(&store).unwrap();
    catalog.add(Book::new("Dune", "Frank Herbert", "111")).unwrap();

    let err = catalog.delete("999").unwrap_err();
    assert!(matches!(err, ManagerError::NotFound { ref key, .. } if key == "999"));
    assert_eq!(catalog.len(), 1);

    catalog.delete("111").unwrap();
    assert!(catalog.find_by_isbn("111").is_none());
    assert!(catalog.is_empty());
}

#[test]
fn update_missing_book_fails() {
    let store = MemoryStore::new();
    let mut catalog = BookCatalog::load(&store).unwrap();

    let err = catalog
        .update("404", &BookUpdate::default().title("Nothing"))
        .unwrap_err();

    assert!(matches!(err, ManagerError::NotFound { entity: EntityKind::Book, .. }));
}

#[test]
fn update_changes_only_supplied_field() {
    let store = MemoryStore::new();
    let mut catalog = BookCatalog::load(&store).unwrap();
    catalog.add(Book::new("Dune", "Frank Herbert", "111")).unwrap();

    catalog
        .update("111", &BookUpdate::default().author("F. Herbert"))
        .unwrap();
    catalog.update("111", &BookUpdate::default()).unwrap();

    assert_eq!(
        catalog.find_by_isbn("111"),
        Some(&Book::new("Dune", "F. Herbert", "111"))
    );
}

#[test]
fn user_directory_mirrors_catalog_rules() {
    let store = MemoryStore::new();
    let mut users = UserDirectory::load(&store).unwrap();
    users.add(User::new("Ada Lovelace", "u1")).unwrap();
    users.add(User::new("Alan Turing", "u2")).unwrap();

    assert!(users.add(User::new("Someone Else", "u2")).is_err());
    assert_eq!(users.len(), 2);

    users.update("u2", &UserUpdate::default()).unwrap();
    assert_eq!(users.find_by_id("u2").unwrap().name, "Alan Turing");

    users
        .update("u2", &UserUpdate::default().name("A. M. Turing"))
        .unwrap();
    assert_eq!(users.find_by_name("turing").len(), 1);

    users.delete("u1").unwrap();
    assert!(users.find_by_id("u1").is_none());
    let ids: Vec<_> = users.list_all().iter().map(|u| u.user_id.as_str()).collect();
    assert_eq!(ids, vec!["u2"]);
}
