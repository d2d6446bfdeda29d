//! Note repository implementation

use chrono::{NaiveDate, SubsecRound, Utc};
use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::models::{FolderId, HexColor, NewNote, Note, NoteFields, NoteId};

const NOTE_COLUMNS: &str =
    "id, heading, description, folder_id, color, body_color, note_date, created_at";

/// Trait for note storage operations
pub trait NoteRepository {
    /// Create a new note, normalizing its description
    fn create(&self, note: &NewNote) -> Result<Note>;

    /// Get a note by ID
    fn get(&self, id: NoteId) -> Result<Option<Note>>;

    /// List undated notes in a folder (or unfiled ones for `None`), newest first
    fn list_by_folder(&self, folder_id: Option<FolderId>) -> Result<Vec<Note>>;

    /// List notes on a calendar date regardless of folder, newest first
    fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Note>>;

    /// Replace heading, description and colors; placement is left untouched
    fn update(&self, id: NoteId, fields: &NoteFields) -> Result<Note>;

    /// Delete a note. Missing IDs are ignored.
    fn delete(&self, id: NoteId) -> Result<()>;
}

/// `SQLite` implementation of `NoteRepository`
pub struct SqliteNoteRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteNoteRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a note from a database row
    fn parse_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
        let id = NoteId::new(row.get(0)?);
        let description: Option<String> = row.get(2)?;
        let banner_color: Option<String> = row.get(4)?;
        let body_color: Option<String> = row.get(5)?;

        Ok(Note {
            id,
            heading: row.get(1)?,
            description: description.unwrap_or_default(),
            folder_id: row.get::<_, Option<i64>>(3)?.map(FolderId::new),
            banner_color: stored_color(id, banner_color.as_deref(), HexColor::default_banner),
            body_color: stored_color(id, body_color.as_deref(), HexColor::default_body),
            note_date: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn query_notes(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(sql)?;
        let notes = stmt
            .query_map(params, Self::parse_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }
}

fn stored_color(id: NoteId, value: Option<&str>, fallback: fn() -> HexColor) -> HexColor {
    match value.map(str::parse::<HexColor>) {
        Some(Ok(color)) => color,
        Some(Err(error)) => {
            tracing::warn!("Note {id} has an unreadable color: {error}");
            fallback()
        }
        None => fallback(),
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create(&self, note: &NewNote) -> Result<Note> {
        let (heading, description) = note.fields.normalized()?;
        // Stored at millisecond precision
        let created_at = Utc::now().naive_utc().trunc_subsecs(3);

        self.conn.execute(
            "INSERT INTO notes (heading, description, folder_id, color, body_color, note_date, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                heading,
                description,
                note.placement.folder_id().map(FolderId::get),
                note.fields.banner_color.as_str(),
                note.fields.body_color.as_str(),
                note.placement.note_date(),
                created_at,
            ],
        )?;

        let id = NoteId::new(self.conn.last_insert_rowid());
        tracing::debug!("Created note {id} ({:?})", note.placement);
        self.get(id)?.ok_or_else(|| Error::NotFound(format!("note {id}")))
    }

    fn get(&self, id: NoteId) -> Result<Option<Note>> {
        let result = self.conn.query_row(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?"),
            params![id.get()],
            Self::parse_note,
        );

        match result {
            Ok(note) => Ok(Some(note)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list_by_folder(&self, folder_id: Option<FolderId>) -> Result<Vec<Note>> {
        // `IS` matches NULL for the unfiled (home) listing
        self.query_notes(
            &format!(
                "SELECT {NOTE_COLUMNS}
                 FROM notes
                 WHERE folder_id IS ? AND note_date IS NULL
                 ORDER BY created_at DESC, id DESC"
            ),
            params![folder_id.map(FolderId::get)],
        )
    }

    fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Note>> {
        self.query_notes(
            &format!(
                "SELECT {NOTE_COLUMNS}
                 FROM notes
                 WHERE note_date = ?
                 ORDER BY created_at DESC, id DESC"
            ),
            params![date],
        )
    }

    fn update(&self, id: NoteId, fields: &NoteFields) -> Result<Note> {
        let (heading, description) = fields.normalized()?;

        let rows = self.conn.execute(
            "UPDATE notes SET heading = ?, description = ?, color = ?, body_color = ? WHERE id = ?",
            params![
                heading,
                description,
                fields.banner_color.as_str(),
                fields.body_color.as_str(),
                id.get(),
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(format!("note {id}")));
        }

        self.get(id)?
            .ok_or_else(|| Error::NotFound(format!("note {id}")))
    }

    fn delete(&self, id: NoteId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?", params![id.get()])?;

        if rows == 0 {
            tracing::debug!("Note {id} already absent");
        }

        Ok(())
    }
}
