//! SQLite storage implementation

use std::path::{Path, PathBuf};

use rusqlite::{ffi, params, Connection};

use super::schema::{self, BootstrapReport};
use crate::contact::Contact;
use crate::{Error, Result};

/// SQLite-backed storage for contacts.
///
/// Holds only the database path: every operation opens its own connection,
/// runs a single statement and closes it again, so reads always see the
/// current persisted state.
#[derive(Debug, Clone)]
pub struct ContactStore {
    path: PathBuf,
}

impl ContactStore {
    /// Open a database file (creates if doesn't exist) and bootstrap the schema
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        let report = store.initialize_schema()?;
        tracing::debug!("Opened contact store at {:?}: {:?}", store.path, report);
        Ok(store)
    }

    /// Path of the backing database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run the schema bootstrap against the backing file
    pub fn initialize_schema(&self) -> Result<BootstrapReport> {
        let mut conn = self.connect()?;
        schema::bootstrap(&mut conn)
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// All contacts, in storage scan order
    pub fn list_all(&self) -> Result<Vec<Contact>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT first_name, last_name, category, phone_number, email, address FROM contacts ORDER BY id",
        )?;

        let contacts = stmt
            .query_map([], row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(contacts)
    }

    /// Count all contacts
    pub fn count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert a new contact; fails with [`Error::AlreadyExists`] when the name pair is taken
    pub fn insert(&self, contact: &Contact) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT INTO contacts (first_name, last_name, category, phone_number, email, address)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                contact.first_name,
                contact.last_name,
                contact.category,
                contact.phone_number,
                contact.email,
                contact.address,
            ],
        )
        .map_err(|e| conflict_or(e, contact))?;
        Ok(())
    }

    /// Overwrite the contact currently named `old_first_name old_last_name`.
    ///
    /// The name pair itself may change. Fails with [`Error::NotFound`] when no
    /// row matches the old pair and with [`Error::AlreadyExists`] when the new
    /// pair belongs to another contact.
    pub fn update(&self, old_first_name: &str, old_last_name: &str, contact: &Contact) -> Result<()> {
        let conn = self.connect()?;
        let changed = conn
            .execute(
                r#"
                UPDATE contacts
                SET first_name = ?1, last_name = ?2, category = ?3, phone_number = ?4, email = ?5, address = ?6
                WHERE first_name = ?7 AND last_name = ?8
                "#,
                params![
                    contact.first_name,
                    contact.last_name,
                    contact.category,
                    contact.phone_number,
                    contact.email,
                    contact.address,
                    old_first_name,
                    old_last_name,
                ],
            )
            .map_err(|e| conflict_or(e, contact))?;

        if changed == 0 {
            return Err(Error::not_found(old_first_name, old_last_name));
        }
        Ok(())
    }

    /// Delete the contact with the exact name pair
    pub fn delete(&self, first_name: &str, last_name: &str) -> Result<()> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "DELETE FROM contacts WHERE first_name = ?1 AND last_name = ?2",
            params![first_name, last_name],
        )?;

        if changed == 0 {
            return Err(Error::not_found(first_name, last_name));
        }
        Ok(())
    }
}

/// Helper to convert a row to a Contact; NULL columns read as empty strings
fn row_to_contact(row: &rusqlite::Row) -> rusqlite::Result<Contact> {
    let text = |idx: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };

    Ok(Contact {
        first_name: row.get(0)?,
        last_name: row.get(1)?,
        category: text(2)?,
        phone_number: text(3)?,
        email: text(4)?,
        address: text(5)?,
    })
}

/// Map a uniqueness violation to [`Error::AlreadyExists`] for `contact`'s name pair.
///
/// Only `UNIQUE` counts; NOT NULL, CHECK and other constraint failures stay storage errors.
fn conflict_or(err: rusqlite::Error, contact: &Contact) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(ref e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE => {
            Error::already_exists(&contact.first_name, &contact.last_name)
        }
        other => Error::Storage(other),
    }
}
