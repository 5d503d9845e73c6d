// error.rs — Error types for content generation.
//
// None of these are retried: a failed generation marks the section
// `failed` and leaves existing records untouched.

use thiserror::Error;

use sp_goal::GoalError;
use sp_study::StudyError;

/// Errors that can occur while generating content.
#[derive(Debug, Error)]
pub enum GenError {
    /// The HTTP call to the model endpoint failed.
    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The model endpoint answered with an error status.
    #[error("model API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The model's output was not the JSON shape we asked for.
    #[error("unparseable model output: {0}")]
    BadModelOutput(String),

    /// Serializing the model-facing snapshot failed.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Dispatching a suggestion into the goal core failed.
    #[error(transparent)]
    Goal(#[from] GoalError),

    /// Dispatching a suggestion into a study store failed.
    #[error(transparent)]
    Study(#[from] StudyError),
}
