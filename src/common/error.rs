//! Error handling for rill

use thiserror::Error;

/// Main error type for rill operations
#[derive(Error, Debug)]
pub enum RillError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Execution error: {0}")]
    Execution(String),
}

/// Result type alias for convenience
pub type RillResult<T> = std::result::Result<T, RillError>;
