//! Folder model

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Database identifier of a folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(i64);

impl FolderId {
    /// Wrap a raw row id
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw row id
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FolderId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A named bucket for notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique identifier
    pub id: FolderId,
    /// Unique, non-empty name
    pub name: String,
}

/// Trim a folder name and reject empty ones
pub fn validate_folder_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("Folder name cannot be empty.".into()));
    }
    Ok(trimmed.to_string())
}
