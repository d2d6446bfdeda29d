//! Error types for scribe-core

use thiserror::Error;

/// Result type alias using scribe-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in scribe-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A folder with this name already exists
    #[error("Folder '{0}' already exists")]
    DuplicateName(String),

    /// User input rejected before it reached the database
    #[error("{0}")]
    Validation(String),

    /// A schema migration step failed; the store cannot be used
    #[error("Schema migration to version {version} failed: {source}")]
    SchemaMigration {
        version: i32,
        #[source]
        source: rusqlite::Error,
    },

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// `SQLite` error
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the caller should report this error and keep going
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DuplicateName(_) | Self::Validation(_) | Self::NotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_errors_are_recoverable() {
        assert!(Error::DuplicateName("Work".to_string()).is_recoverable());
        assert!(Error::Validation("Heading is required".to_string()).is_recoverable());
        assert!(Error::NotFound("note 7".to_string()).is_recoverable());
    }

    #[test]
    fn test_storage_errors_are_not_recoverable() {
        let error = Error::Sqlite(rusqlite::Error::QueryReturnedNoRows);
        assert!(!error.is_recoverable());

        let error = Error::Io(std::io::Error::other("disk full"));
        assert!(!error.is_recoverable());
    }
}
