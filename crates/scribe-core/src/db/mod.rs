//! Database layer for QuickScribe

mod connection;
mod folder_repository;
pub(crate) mod migrations;
mod note_repository;

pub use connection::Database;
pub use folder_repository::{FolderRepository, SqliteFolderRepository};
pub use note_repository::{NoteRepository, SqliteNoteRepository};
