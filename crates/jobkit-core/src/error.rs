//! Error types for the jobkit library.

use std::path::PathBuf;

use thiserror::Error;

use crate::{graph::DependencyError, models::AssetKind, template::TemplateError};

/// Comprehensive error type for all jobkit operations.
#[derive(Error, Debug)]
pub enum JobkitError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Template could not be read or parsed
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// Asset not found in the library
    #[error("{kind} '{name}' not found")]
    AssetNotFound { kind: AssetKind, name: String },
    /// Asset with the same kind and name already exists
    #[error("{kind} '{name}' already exists")]
    AssetExists { kind: AssetKind, name: String },
    /// Parameter not present in the asset's current parameter set
    #[error("Parameter '{parameter}' not found in {kind} '{asset}'")]
    ParameterNotFound {
        kind: AssetKind,
        asset: String,
        parameter: String,
    },
    /// Asset parameters diverge from the template
    #[error("Parameters of {kind} '{name}' are not consistent with the template: {reason}")]
    ParametersNotConsistent {
        kind: AssetKind,
        name: String,
        reason: String,
    },
    /// Step dependency graph is invalid
    #[error(transparent)]
    Dependency(#[from] DependencyError),
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

impl JobkitError {
    /// Creates a new database error with additional context.
    pub fn database(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    /// Creates an input validation error for a field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| JobkitError::database(message, e))
    }
}

/// Result type alias for jobkit operations
pub type Result<T> = std::result::Result<T, JobkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_not_found_message() {
        let err = JobkitError::ParameterNotFound {
            kind: AssetKind::Step,
            asset: "Render".to_string(),
            parameter: "ChunkSize".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'ChunkSize' not found in step 'Render'"
        );
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.db_context("Failed to load asset").unwrap_err();
        assert!(matches!(err, JobkitError::Database { .. }));
        assert!(err.to_string().contains("Failed to load asset"));
    }
}
