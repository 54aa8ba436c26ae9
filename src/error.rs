//! Error types for Minimail.

use thiserror::Error;

/// Common error type for Minimail.
#[derive(Error, Debug)]
pub enum MinimailError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from the storage
    /// backend. Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Conflict with existing state (duplicate identity).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// External dependency failure (resolver, suggestion process).
    #[error("dependency unavailable: {0}")]
    Dependency(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for MinimailError {
    fn from(e: sqlx::Error) -> Self {
        MinimailError::Database(e.to_string())
    }
}

/// Result type alias for Minimail operations.
pub type Result<T> = std::result::Result<T, MinimailError>;
