//! scribe-core - Core library for QuickScribe
//!
//! This crate contains the note and folder models, the `SQLite` storage layer
//! with its schema migrations, description sanitization and card rendering,
//! and the view-state controller that drives every client.

pub mod db;
pub mod error;
pub mod models;
pub mod render;
pub mod sanitize;
pub mod services;
pub mod util;
pub mod view;

pub use error::{Error, Result};
pub use models::{Folder, FolderId, HexColor, NewNote, Note, NoteFields, NoteId, Placement};
pub use services::Store;
