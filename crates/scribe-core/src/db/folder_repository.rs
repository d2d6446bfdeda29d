//! Folder repository implementation

use rusqlite::{ffi, params, Connection, ErrorCode};

use crate::error::{Error, Result};
use crate::models::{validate_folder_name, Folder, FolderId};

/// Trait for folder storage operations
pub trait FolderRepository {
    /// Create a folder; fails with `DuplicateName` if the name is taken
    fn create(&self, name: &str) -> Result<Folder>;

    /// Get a folder by ID
    fn get(&self, id: FolderId) -> Result<Option<Folder>>;

    /// List all folders by name
    fn list(&self) -> Result<Vec<Folder>>;

    /// Delete a folder and, by cascade, its notes. Missing IDs are ignored.
    fn delete(&self, id: FolderId) -> Result<()>;
}

/// `SQLite` implementation of `FolderRepository`
pub struct SqliteFolderRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteFolderRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_folder(row: &rusqlite::Row<'_>) -> rusqlite::Result<Folder> {
        Ok(Folder {
            id: FolderId::new(row.get(0)?),
            name: row.get(1)?,
        })
    }
}

fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl FolderRepository for SqliteFolderRepository<'_> {
    fn create(&self, name: &str) -> Result<Folder> {
        let name = validate_folder_name(name)?;

        match self
            .conn
            .execute("INSERT INTO folders (name) VALUES (?)", params![name])
        {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(Error::DuplicateName(name)),
            Err(e) => return Err(e.into()),
        }

        let id = FolderId::new(self.conn.last_insert_rowid());
        tracing::debug!("Created folder {id} '{name}'");
        Ok(Folder { id, name })
    }

    fn get(&self, id: FolderId) -> Result<Option<Folder>> {
        let result = self.conn.query_row(
            "SELECT id, name FROM folders WHERE id = ?",
            params![id.get()],
            Self::parse_folder,
        );

        match result {
            Ok(folder) => Ok(Some(folder)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<Folder>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM folders ORDER BY name ASC")?;

        let folders = stmt
            .query_map([], Self::parse_folder)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(folders)
    }

    fn delete(&self, id: FolderId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM folders WHERE id = ?", params![id.get()])?;

        if rows == 0 {
            tracing::debug!("Folder {id} already absent");
        }

        Ok(())
    }
}
