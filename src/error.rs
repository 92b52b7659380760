//! Error types for SeriesDB

use std::fmt;

/// Result type alias for SeriesDB operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for SeriesDB
#[derive(Debug)]
pub enum Error {
    /// Errors from the underlying SQL engine
    Database(sqlx::Error),
    /// IO errors
    Io(std::io::Error),
    /// Configuration errors
    Config(String),
    /// Internal error (invariant violation, corrupt row)
    Internal(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(e) => write!(f, "Database error: {}", e),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Error::Database(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
