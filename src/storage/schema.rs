//! Database schema definitions and the startup bootstrap
//!
//! The bootstrap is a one-time upgrade path, not a migration framework: it
//! knows the current table shape and the single legacy shape that stored a
//! full `name` instead of a split name pair.

use rusqlite::{params, Connection, Transaction};

use crate::{Error, Result};

/// Name of the only table
pub const CONTACTS_TABLE: &str = "contacts";

/// SQL to create the contacts table
pub const CREATE_CONTACTS_TABLE: &str = r#"
CREATE TABLE contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    category TEXT,
    phone_number TEXT,
    email TEXT,
    address TEXT,
    UNIQUE(first_name, last_name)
)
"#;

/// Same shape as [`CREATE_CONTACTS_TABLE`], under a staging name
const CREATE_STAGING_TABLE: &str = r#"
CREATE TABLE contacts_new (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    category TEXT,
    phone_number TEXT,
    email TEXT,
    address TEXT,
    UNIQUE(first_name, last_name)
)
"#;

const ADD_CATEGORY_COLUMN: &str = "ALTER TABLE contacts ADD COLUMN category TEXT";

/// Columns of the current schema, in storage order (excluding `id`)
pub const CONTACT_COLUMNS: &[&str] = &[
    "first_name",
    "last_name",
    "category",
    "phone_number",
    "email",
    "address",
];

/// What the bootstrap had to do to bring the table up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BootstrapReport {
    pub created: bool,
    pub migrated_rows: usize,
    pub skipped_rows: usize,
    pub added_category: bool,
}

impl BootstrapReport {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Column names of `table`, empty when the table does not exist
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

/// Ensure the contacts table exists in its current shape.
///
/// Runs in one transaction; safe to call on every start. A table that is
/// neither the current shape nor the legacy `name` shape is rejected with
/// [`Error::UnsupportedSchema`] and left as it is.
pub fn bootstrap(conn: &mut Connection) -> Result<BootstrapReport> {
    let mut report = BootstrapReport::default();
    let tx = conn.transaction()?;

    let mut columns = table_columns(&tx, CONTACTS_TABLE)?;

    if columns.is_empty() {
        tx.execute_batch(CREATE_CONTACTS_TABLE)?;
        tx.commit()?;
        report.created = true;
        tracing::info!("Created contacts table");
        return Ok(report);
    }

    let has = |columns: &[String], name: &str| columns.iter().any(|c| c == name);

    if !has(&columns, "first_name") || !has(&columns, "last_name") {
        if !has(&columns, "name") {
            // Dropping the transaction rolls back; the table is left untouched
            return Err(Error::UnsupportedSchema(columns));
        }
        let (migrated, skipped) = migrate_legacy_names(&tx, &columns)?;
        report.migrated_rows = migrated;
        report.skipped_rows = skipped;
        columns = table_columns(&tx, CONTACTS_TABLE)?;
    }

    if !has(&columns, "category") {
        tx.execute(ADD_CATEGORY_COLUMN, [])?;
        report.added_category = true;
        tracing::info!("Added category column to contacts table");
    }

    tx.commit()?;
    Ok(report)
}

/// Split a legacy full name on its first space; no space leaves `last_name` empty
pub fn split_legacy_name(full_name: &str) -> (String, String) {
    match full_name.split_once(' ') {
        Some((first, last)) => (first.to_string(), last.to_string()),
        None => (full_name.to_string(), String::new()),
    }
}

/// Rebuild a legacy `name`-keyed table into the current shape.
///
/// Returns `(migrated, skipped)`; a row is skipped when its split name pair
/// is already taken by an earlier row.
fn migrate_legacy_names(tx: &Transaction<'_>, columns: &[String]) -> Result<(usize, usize)> {
    tracing::info!("Upgrading legacy contacts table (single name column)");

    let select_or_null = |name: &str| {
        if columns.iter().any(|c| c == name) {
            name.to_string()
        } else {
            format!("NULL AS {name}")
        }
    };
    let select = format!(
        "SELECT {}, {}, {}, {}, {} FROM contacts ORDER BY rowid",
        select_or_null("name"),
        select_or_null("category"),
        select_or_null("phone_number"),
        select_or_null("email"),
        select_or_null("address"),
    );

    tx.execute_batch(CREATE_STAGING_TABLE)?;

    let rows = {
        let mut stmt = tx.prepare(&select)?;
        stmt.query_map([], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?
    };

    let mut migrated = 0;
    let mut skipped = 0;
    for (name, category, phone_number, email, address) in rows {
        let (first_name, last_name) = split_legacy_name(name.as_deref().unwrap_or_default());
        let inserted = tx.execute(
            r#"
            INSERT OR IGNORE INTO contacts_new (first_name, last_name, category, phone_number, email, address)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                first_name,
                last_name,
                category.unwrap_or_default(),
                phone_number,
                email,
                address,
            ],
        )?;
        if inserted == 0 {
            tracing::warn!(
                "Skipping legacy contact {} {}: name pair already migrated",
                first_name,
                last_name
            );
            skipped += 1;
        } else {
            migrated += 1;
        }
    }

    tx.execute_batch(
        r#"
        DROP TABLE contacts;
        ALTER TABLE contacts_new RENAME TO contacts;
        "#,
    )?;

    tracing::info!("Migrated {} legacy contacts ({} skipped)", migrated, skipped);
    Ok((migrated, skipped))
}
