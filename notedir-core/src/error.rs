//! Error types for the notedir ecosystem.

use thiserror::Error;

/// Errors that can occur in notedir operations.
#[derive(Error, Debug)]
pub enum NoteDirError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar source connection failed: {0}")]
    Connection(String),

    #[error("Source '{0}' not found in PATH")]
    SourceNotInstalled(String),

    #[error("Source request timed out after {0}s")]
    SourceTimeout(u64),

    #[error("Appointment query failed: {0}")]
    Query(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for notedir operations.
pub type NoteDirResult<T> = Result<T, NoteDirError>;
