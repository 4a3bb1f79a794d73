use crate::model::ValidationError;

/// Errors that can occur during storage operations.
///
/// Reads never produce these: a missing or corrupt slot reads as an empty
/// history. Only writes, imports, and setup can fail.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An I/O error occurred while writing the slot or a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A log could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A log was rejected before being written.
    #[error("invalid log: {0}")]
    Validation(#[from] ValidationError),

    /// An import snapshot is not valid JSON.
    #[error("snapshot is not valid JSON: {0}")]
    InvalidSnapshot(#[source] serde_json::Error),

    /// An import snapshot is valid JSON but its top level is not an array.
    #[error("snapshot must be a JSON array of logs")]
    NotAnArray,

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,

    /// The platform does not provide a home directory.
    #[error("could not determine home directory")]
    NoHomeDir,
}
