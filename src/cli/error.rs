use crate::model::ValidationError;
use crate::storage::StorageError;

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Writing command output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A log could not be rendered as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A storage error occurred while reading or persisting logs.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A value given on the command line is out of range.
    #[error("Invalid value: {0}")]
    Validation(#[from] ValidationError),
}
