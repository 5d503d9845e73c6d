// error.rs — Error types for the study-content domains.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur in the study-content stores.
#[derive(Debug, Error)]
pub enum StudyError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize a record.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A field failed validation.
    #[error("{0}")]
    Validation(String),

    /// The record does not exist for this user.
    #[error("record not found: {0}")]
    NotFound(Uuid),

    /// Per-user record ceiling reached.
    #[error("{kind} limit reached ({limit})")]
    LimitExceeded { kind: &'static str, limit: usize },

    /// The same file content was already uploaded by this user.
    #[error("this file has already been uploaded")]
    DuplicateUpload,
}
