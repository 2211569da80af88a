//! Error types for the scheduling library.
//!
//! Capacity conflicts, exhausted horizons and duplicate review chains are not
//! errors here. They are ordinary result values (see [`crate::engine`]) that
//! callers inspect and act upon.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all scheduler operations.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Goal not found for the given ID
    #[error("Goal with ID {id} not found")]
    GoalNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Malformed input, rejected before any state is touched
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A goal is not in a state that allows the requested change
    #[error("Goal {id} cannot be changed: {reason}")]
    InvalidTransition { id: u64, reason: String },
    /// Calendar arithmetic left the supported date range
    #[error("Calendar error: {source}")]
    Calendar {
        #[from]
        source: jiff::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> SchedulerError {
        SchedulerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> SchedulerError {
        SchedulerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl SchedulerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a transition error for a goal in the wrong state.
    pub fn invalid_transition(id: u64, reason: impl Into<String>) -> Self {
        SchedulerError::InvalidTransition {
            id,
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by caller input rather than by the store.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SchedulerError::InvalidInput { .. } | SchedulerError::InvalidTransition { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| SchedulerError::database(message).with_source(e))
    }
}

/// Result type alias for scheduler operations
pub type Result<T> = std::result::Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let err = SchedulerError::invalid_input("planned_minutes").with_reason("too long");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'planned_minutes': too long"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.db_context("Failed to load goal").unwrap_err();
        assert!(matches!(err, SchedulerError::Database { .. }));
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Database error: Failed to load goal");
    }
}
