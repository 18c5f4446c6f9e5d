use rolodex::storage::schema::{table_columns, CONTACTS_TABLE};
use rolodex::{Contact, ContactStore, Error};
use rusqlite::Connection;
use std::path::Path;
use std::thread;

fn write_legacy_db(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            phone_number TEXT,
            email TEXT,
            address TEXT
        );
        INSERT INTO contacts (name, phone_number, email, address)
            VALUES ('John Doe', '555-0199', 'john@doe.com', '2 Elm St');
        "#,
    )
    .unwrap();
}

#[test]
fn legacy_database_is_upgraded_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");
    write_legacy_db(&path);

    let store = ContactStore::open(&path).unwrap();

    assert_eq!(
        store.list_all().unwrap(),
        vec![Contact::new("John", "Doe")
            .with_phone_number("555-0199")
            .with_email("john@doe.com")
            .with_address("2 Elm St")]
    );

    let conn = Connection::open(&path).unwrap();
    let columns = table_columns(&conn, CONTACTS_TABLE).unwrap();
    assert!(!columns.contains(&"name".to_string()));
    assert!(columns.contains(&"category".to_string()));
}

#[test]
fn upgraded_database_enforces_name_pair_uniqueness() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");
    write_legacy_db(&path);

    let store = ContactStore::open(&path).unwrap();
    let err = store.insert(&Contact::new("John", "Doe")).unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { .. }));
}

#[test]
fn reopening_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.db");

    let store = ContactStore::open(&path).unwrap();
    store.insert(&Contact::new("Ada", "Lovelace")).unwrap();
    let shape = table_columns(&Connection::open(&path).unwrap(), CONTACTS_TABLE).unwrap();

    let store = ContactStore::open(&path).unwrap();
    assert!(store.initialize_schema().unwrap().is_noop());

    assert_eq!(
        table_columns(&Connection::open(&path).unwrap(), CONTACTS_TABLE).unwrap(),
        shape
    );
    assert_eq!(store.list_all().unwrap(), vec![Contact::new("Ada", "Lovelace")]);
}

#[test]
fn concurrent_inserts_of_one_pair_have_a_single_winner() {
    let dir = tempfile::tempdir().unwrap();
    let store = ContactStore::open(dir.path().join("race.db")).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                store.insert(&Contact::new("Same", "Name").with_phone_number(i.to_string()))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();

    assert_eq!(winners, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, Error::AlreadyExists { .. })));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn unrecognized_table_is_rejected_and_left_intact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odd.db");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE contacts (first_name TEXT, surname TEXT, phone_number TEXT);
            INSERT INTO contacts VALUES ('Ann', 'Lee', '1');
            INSERT INTO contacts VALUES ('Bob', 'Ray', '2');
            "#,
        )
        .unwrap();
    }

    let err = ContactStore::open(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedSchema(_)));

    let conn = Connection::open(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM contacts WHERE first_name IN ('Ann', 'Bob')", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 2);
    assert!(!table_columns(&conn, CONTACTS_TABLE)
        .unwrap()
        .contains(&"last_name".to_string()));
}
