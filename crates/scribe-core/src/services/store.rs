//! The storage capability handed to the view controller and clients.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::db::{
    Database, FolderRepository, NoteRepository, SqliteFolderRepository, SqliteNoteRepository,
};
use crate::models::{Folder, FolderId, NewNote, Note, NoteFields, NoteId};
use crate::Result;

/// Folder and note operations over one migrated database.
///
/// Every call is a single statement in autocommit mode, so it is either fully
/// applied or not at all, and nothing is held open between calls.
pub struct Store {
    db: Database,
    db_path: Option<PathBuf>,
}

impl Store {
    /// Open (and migrate) the store at the given filesystem path.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let db = Database::open(&db_path)?;
        tracing::debug!("Store ready at {}", db_path.display());
        Ok(Self {
            db,
            db_path: Some(db_path),
        })
    }

    /// Open an in-memory store (primarily for tests).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            db: Database::open_in_memory()?,
            db_path: None,
        })
    }

    /// Location of the database file, if not in memory.
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn folders(&self) -> SqliteFolderRepository<'_> {
        SqliteFolderRepository::new(self.db.connection())
    }

    fn notes(&self) -> SqliteNoteRepository<'_> {
        SqliteNoteRepository::new(self.db.connection())
    }

    /// Create a folder; `Error::DuplicateName` when the name is taken.
    pub fn create_folder(&self, name: &str) -> Result<Folder> {
        self.folders().create(name)
    }

    /// All folders, ordered by name.
    pub fn list_folders(&self) -> Result<Vec<Folder>> {
        self.folders().list()
    }

    /// Fetch a folder by id.
    pub fn get_folder(&self, id: FolderId) -> Result<Option<Folder>> {
        self.folders().get(id)
    }

    /// Delete a folder together with its notes.
    pub fn delete_folder(&self, id: FolderId) -> Result<()> {
        self.folders().delete(id)
    }

    /// Create a note.
    pub fn create_note(&self, note: &NewNote) -> Result<Note> {
        self.notes().create(note)
    }

    /// Fetch a note by id.
    pub fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        self.notes().get(id)
    }

    /// Undated notes in a folder, or unfiled ones for `None`, newest first.
    pub fn list_notes_by_folder(&self, folder_id: Option<FolderId>) -> Result<Vec<Note>> {
        self.notes().list_by_folder(folder_id)
    }

    /// Notes on a date, newest first.
    pub fn list_notes_by_date(&self, date: NaiveDate) -> Result<Vec<Note>> {
        self.notes().list_by_date(date)
    }

    /// Replace a note's heading, description and colors.
    pub fn update_note(&self, id: NoteId, fields: &NoteFields) -> Result<Note> {
        self.notes().update(id, fields)
    }

    /// Delete a note.
    pub fn delete_note(&self, id: NoteId) -> Result<()> {
        self.notes().delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Placement;
    use crate::Error;
    use tempfile::tempdir;

    #[test]
    fn in_memory_create_and_list_roundtrip() {
        let store = Store::open_in_memory().unwrap();

        store
            .create_note(&NewNote::new(NoteFields::new("hello core"), Placement::Home))
            .unwrap();
        let notes = store.list_notes_by_folder(None).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].heading, "hello core");
        assert!(store.path().is_none());
    }

    #[test]
    fn duplicate_folder_leaves_one_row() {
        let store = Store::open_in_memory().unwrap();

        store.create_folder("Work").unwrap();
        assert!(matches!(
            store.create_folder("Work"),
            Err(Error::DuplicateName(_))
        ));

        let work_rows = store
            .list_folders()
            .unwrap()
            .into_iter()
            .filter(|folder| folder.name == "Work")
            .count();
        assert_eq!(work_rows, 1);
    }

    #[test]
    fn data_survives_reopen() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("notes.db");

        let folder_id = {
            let store = Store::open(&db_path).unwrap();
            let folder = store.create_folder("Ideas").unwrap();
            store
                .create_note(&NewNote::new(
                    NoteFields::new("Keep me"),
                    Placement::Folder(folder.id),
                ))
                .unwrap();
            folder.id
        };

        let store = Store::open(&db_path).unwrap();
        assert_eq!(store.path(), Some(db_path.as_path()));
        let notes = store.list_notes_by_folder(Some(folder_id)).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].heading, "Keep me");
    }
}
