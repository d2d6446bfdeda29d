//! Database migrations
//!
//! Each step records its version in `schema_version` and checks whether its
//! change is still needed before applying it, so databases created before
//! version tracking existed are upgraded in place.

use rusqlite::Connection;

use crate::error::{Error, Result};

/// Current schema version
pub const CURRENT_VERSION: i32 = 3;

struct Migration {
    version: i32,
    description: &'static str,
    apply: fn(&Connection) -> rusqlite::Result<()>,
}

const MIGRATIONS: [Migration; 3] = [
    Migration {
        version: 1,
        description: "folders and notes",
        apply: migrate_v1,
    },
    Migration {
        version: 2,
        description: "note body color",
        apply: migrate_v2,
    },
    Migration {
        version: 3,
        description: "note date",
        apply: migrate_v3,
    },
];

/// Run all pending migrations
pub fn run(conn: &Connection) -> Result<()> {
    let version = get_version(conn)?;
    if version >= CURRENT_VERSION {
        tracing::debug!("Database schema at version {version}, nothing to migrate");
        return Ok(());
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > version) {
        apply(conn, migration).map_err(|source| Error::SchemaMigration {
            version: migration.version,
            source,
        })?;
        tracing::info!(
            "Migrated database to version {} ({})",
            migration.version,
            migration.description
        );
    }

    Ok(())
}

fn apply(conn: &Connection, migration: &Migration) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    (migration.apply)(&tx)?;
    tx.execute(
        "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
        [migration.version],
    )?;
    tx.commit()
}

/// Get the current schema version
pub fn get_version(conn: &Connection) -> Result<i32> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM pragma_table_info(?1) WHERE name = ?2)",
        [table, column],
        |row| row.get(0),
    )
}

/// Migration to version 1: initial schema
fn migrate_v1(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );
        CREATE TABLE IF NOT EXISTS folders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );
        CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            heading TEXT NOT NULL,
            description TEXT,
            folder_id INTEGER,
            color TEXT DEFAULT '#FFFFE0',
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (folder_id) REFERENCES folders(id) ON DELETE CASCADE
        );",
    )
}

/// Migration to version 2: separate body color
fn migrate_v2(conn: &Connection) -> rusqlite::Result<()> {
    if column_exists(conn, "notes", "body_color")? {
        tracing::debug!("notes.body_color already present");
        return Ok(());
    }
    conn.execute_batch("ALTER TABLE notes ADD COLUMN body_color TEXT DEFAULT '#FFFFFF';")
}

/// Migration to version 3: optional calendar date
fn migrate_v3(conn: &Connection) -> rusqlite::Result<()> {
    if column_exists(conn, "notes", "note_date")? {
        tracing::debug!("notes.note_date already present");
    } else {
        conn.execute_batch("ALTER TABLE notes ADD COLUMN note_date DATE;")?;
    }
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_notes_folder ON notes(folder_id);
        CREATE INDEX IF NOT EXISTS idx_notes_date ON notes(note_date);",
    )
}
