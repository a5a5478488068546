use chrono::NaiveDate;
use library_core::{
    Book, BookCatalog, CheckoutRecord, Dataset, DatasetStore, JsonFileStore, ManagerError,
    StorageError, User, UserDirectory,
};
use serde_json::Value;

fn sample_dataset() -> Dataset {
    let due = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    Dataset {
        books: vec![
            Book::new("Dune", "Frank Herbert", "111"),
            Book::new("Neuromancer", "William Gibson", "222"),
        ],
        users: vec![User::new("Ada", "u1"), User::new("Grace", "u2")],
        checkouts: vec![CheckoutRecord::new("u2", "222", due)],
    }
}

#[test]
fn write_then_read_preserves_dataset_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("library_data.json"));
    let dataset = sample_dataset();

    store.write(&dataset).unwrap();

    assert_eq!(store.read().unwrap(), dataset);
}

#[test]
fn file_layout_uses_named_sections_and_iso_due_dates() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("library_data.json"));
    store.write(&sample_dataset()).unwrap();

    let raw: Value = serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();

    assert_eq!(raw["books"][0]["title"], "Dune");
    assert_eq!(raw["users"][1]["user_id"], "u2");
    assert_eq!(raw["checkouts"][0]["due_date"], "2024-03-01T09:30:00");
}

#[test]
fn init_storage_creates_empty_file_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("library_data.json");
    let store = JsonFileStore::new(&path);

    assert!(store.init_storage().unwrap());
    assert_eq!(store.read().unwrap(), Dataset::default());

    store.write(&sample_dataset()).unwrap();
    assert!(!store.init_storage().unwrap());
    assert_eq!(store.read().unwrap(), sample_dataset());

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(reopened.read().unwrap().books.len(), 2);
}

#[test]
fn file_with_missing_sections_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library_data.json");
    std::fs::write(
        &path,
        r#"{"books": [{"title": "Dune", "author": "Frank Herbert", "isbn": "111"}]}"#,
    )
    .unwrap();

    let dataset = JsonFileStore::new(&path).read().unwrap();

    assert_eq!(dataset.books.len(), 1);
    assert!(dataset.users.is_empty());
    assert!(dataset.checkouts.is_empty());
}

#[test]
fn malformed_record_fails_manager_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library_data.json");
    std::fs::write(&path, r#"{"books": [{"title": "No isbn", "author": "Anon"}]}"#).unwrap();
    let store = JsonFileStore::new(&path);

    let err = BookCatalog::load(&store).err().unwrap();

    assert!(!err.is_recoverable());
    assert!(matches!(
        err,
        ManagerError::Storage(StorageError::Malformed { .. })
    ));
}

#[test]
fn unreadable_path_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());

    let err = store.read().unwrap_err();

    assert!(matches!(err, StorageError::Io { .. }));
}

#[test]
fn managers_sharing_one_store_do_not_clobber_sections() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("library_data.json")).unwrap();
    let mut users = UserDirectory::load(&store).unwrap();
    let mut books = BookCatalog::load(&store).unwrap();

    users.add(User::new("Ada", "u1")).unwrap();
    books.add(Book::new("Dune", "Frank Herbert", "111")).unwrap();

    let persisted = store.read().unwrap();
    assert_eq!(persisted.users, vec![User::new("Ada", "u1")]);
    assert_eq!(persisted.books, vec![Book::new("Dune", "Frank Herbert", "111")]);
}

#[test]
fn reloaded_managers_see_persisted_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library_data.json");
    {
        let store = JsonFileStore::open(&path).unwrap();
        let mut books = BookCatalog::load(&store).unwrap();
        books.add(Book::new("Dune", "Frank Herbert", "111")).unwrap();
        books.add(Book::new("Emma", "Jane Austen", "222")).unwrap();
        books.delete("111").unwrap();
    }

    let store = JsonFileStore::open(&path).unwrap();
    let books = BookCatalog::load(&store).unwrap();

    assert_eq!(books.list_all(), &[Book::new("Emma", "Jane Austen", "222")]);
}

#[test]
fn failed_write_surfaces_as_fatal_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("shelf");
    let store = JsonFileStore::open(data_dir.join("library_data.json")).unwrap();
    let mut books = BookCatalog::load(&store).unwrap();
    std::fs::remove_dir_all(&data_dir).unwrap();

    let err = books
        .add(Book::new("Dune", "Frank Herbert", "111"))
        .unwrap_err();

    assert!(!err.is_recoverable());
    assert!(matches!(
        err,
        ManagerError::Storage(StorageError::Io { .. })
    ));
    // Memory is updated before the save; nothing reached disk.
    assert_eq!(books.len(), 1);
    assert!(!store.path().exists());
}
