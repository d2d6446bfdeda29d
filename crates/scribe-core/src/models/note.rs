//! Note model

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{FolderId, HexColor};
use crate::error::{Error, Result};
use crate::sanitize::normalize_description;

/// Longest heading accepted, in characters
pub const MAX_HEADING_CHARS: usize = 100;

/// Database identifier of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw row id
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw row id
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Where a note lives: unfiled, inside a folder, or on a calendar date.
///
/// A note has exactly one placement axis, so folder and date never coexist
/// on the write path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Placement {
    #[default]
    Home,
    Folder(FolderId),
    Date(NaiveDate),
}

impl Placement {
    /// Folder column value for this placement
    pub const fn folder_id(self) -> Option<FolderId> {
        match self {
            Self::Folder(id) => Some(id),
            Self::Home | Self::Date(_) => None,
        }
    }

    /// Date column value for this placement
    pub const fn note_date(self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(date),
            Self::Home | Self::Folder(_) => None,
        }
    }
}

/// The user-editable fields of a note, as submitted by a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFields {
    pub heading: String,
    /// Raw HTML from the editor; normalized before storage
    pub description: Option<String>,
    pub banner_color: HexColor,
    pub body_color: HexColor,
}

impl NoteFields {
    /// Fields with the given heading, no description and default colors
    #[must_use]
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            description: None,
            banner_color: HexColor::default_banner(),
            body_color: HexColor::default_body(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_colors(mut self, banner_color: HexColor, body_color: HexColor) -> Self {
        self.banner_color = banner_color;
        self.body_color = body_color;
        self
    }

    /// Validate and normalize for storage: trimmed heading, clean description
    pub fn normalized(&self) -> Result<(String, String)> {
        let heading = validate_heading(&self.heading)?;
        let description = normalize_description(self.description.as_deref());
        Ok((heading, description))
    }
}

/// A note to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub fields: NoteFields,
    pub placement: Placement,
}

impl NewNote {
    pub const fn new(fields: NoteFields, placement: Placement) -> Self {
        Self { fields, placement }
    }
}

/// A stored note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Plain-text heading
    pub heading: String,
    /// Normalized HTML body (empty when there is no content)
    pub description: String,
    pub folder_id: Option<FolderId>,
    pub banner_color: HexColor,
    pub body_color: HexColor,
    pub note_date: Option<NaiveDate>,
    /// Creation timestamp (UTC)
    pub created_at: NaiveDateTime,
}

impl Note {
    /// Placement derived from the stored columns; a date wins over a folder
    pub const fn placement(&self) -> Placement {
        match (self.note_date, self.folder_id) {
            (Some(date), _) => Placement::Date(date),
            (None, Some(folder_id)) => Placement::Folder(folder_id),
            (None, None) => Placement::Home,
        }
    }

    /// Current values as editable form fields
    #[must_use]
    pub fn fields(&self) -> NoteFields {
        NoteFields {
            heading: self.heading.clone(),
            description: Some(self.description.clone()),
            banner_color: self.banner_color.clone(),
            body_color: self.body_color.clone(),
        }
    }
}

fn validate_heading(heading: &str) -> Result<String> {
    let trimmed = heading.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("Note heading cannot be empty.".into()));
    }
    if trimmed.chars().count() > MAX_HEADING_CHARS {
        return Err(Error::Validation(format!(
            "Note heading cannot be longer than {MAX_HEADING_CHARS} characters."
        )));
    }
    Ok(trimmed.to_string())
}
