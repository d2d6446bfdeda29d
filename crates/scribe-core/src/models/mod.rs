//! Data models for QuickScribe

mod color;
mod folder;
mod note;

pub(crate) use color::parse_rgb;
pub use color::{HexColor, ParseColorError, DEFAULT_BANNER_COLOR, DEFAULT_BODY_COLOR};
pub use folder::{validate_folder_name, Folder, FolderId};
pub use note::{NewNote, Note, NoteFields, NoteId, Placement, MAX_HEADING_CHARS};
