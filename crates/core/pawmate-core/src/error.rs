//! Error types for Pawmate core

use thiserror::Error;

/// Main error type for Pawmate operations
#[derive(Debug, Error)]
pub enum PawmateError {
    /// Database operation error (from sqlx)
    #[error("Database error: {0}")]
    DatabaseSqlx(#[from] sqlx::Error),

    /// Database operation error (custom message)
    #[error("Database error: {0}")]
    Database(String),

    /// A store write failed; carries the operation name so callers can
    /// decide on retry
    #[error("Persistence failure in {operation}: {message}")]
    Persistence {
        /// Store operation that failed (e.g. "save_stats")
        operation: String,
        /// Underlying error message
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error (generic)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Convenient Result type using PawmateError
pub type Result<T> = std::result::Result<T, PawmateError>;

impl PawmateError {
    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        PawmateError::Database(msg.into())
    }

    /// Create a persistence error tagged with the failing operation
    pub fn persistence(operation: impl Into<String>, message: impl Into<String>) -> Self {
        PawmateError::Persistence {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        PawmateError::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        PawmateError::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        PawmateError::NotFound(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        PawmateError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PawmateError::not_found("pet 42");
        assert_eq!(err.to_string(), "Not found: pet 42");

        let err = PawmateError::persistence("save_stats", "connection reset");
        assert_eq!(
            err.to_string(),
            "Persistence failure in save_stats: connection reset"
        );
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        assert_eq!(returns_result().unwrap(), 42);
    }
}
