// error.rs — Error types for the goal subsystem.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during goal operations.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize goal data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The requested insertion order is outside the valid range.
    #[error("invalid goal order: {order}")]
    InvalidOrder { order: u32 },

    /// No goal with the given id exists for the user.
    #[error("goal not found: {0}")]
    NotFound(Uuid),

    /// No goal occupies the given order for the user.
    #[error("no goal at order {order}")]
    NotFoundAtOrder { order: u32 },

    /// The per-user goal ceiling is reached.
    #[error("goal limit reached ({limit})")]
    LimitExceeded { limit: usize },

    /// A field failed validation.
    #[error("{0}")]
    Validation(String),
}
