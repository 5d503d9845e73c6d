// error.rs — HTTP error envelope and status mapping.
//
// Every failure leaves the daemon as `{"error": "..."}` with the status
// the original API contract promises: validation 400, missing records
// 404, the goal ceiling 409, the upload ceiling 403, model failures on
// the synchronous paths 502. Store-level I/O problems are a plain 500
// with the detail kept in the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use sp_genai::GenError;
use sp_goal::GoalError;
use sp_study::StudyError;

/// An error ready to leave the HTTP layer.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!("internal error: {detail}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<GoalError> for ApiError {
    fn from(e: GoalError) -> Self {
        match &e {
            GoalError::InvalidOrder { .. } | GoalError::Validation(_) => {
                Self::bad_request(e.to_string())
            }
            GoalError::NotFound(_) | GoalError::NotFoundAtOrder { .. } => {
                Self::not_found(e.to_string())
            }
            GoalError::LimitExceeded { .. } => Self::new(StatusCode::CONFLICT, e.to_string()),
            GoalError::IoError { .. } | GoalError::SerializationError(_) => Self::internal(e),
        }
    }
}

impl From<StudyError> for ApiError {
    fn from(e: StudyError) -> Self {
        match &e {
            StudyError::Validation(_) | StudyError::DuplicateUpload => {
                Self::bad_request(e.to_string())
            }
            StudyError::NotFound(_) => Self::not_found(e.to_string()),
            // The upload ceiling is a 403 (the account holds too much);
            // content ceilings are 409 like the goal ceiling.
            StudyError::LimitExceeded { kind: "upload", .. } => {
                Self::new(StatusCode::FORBIDDEN, e.to_string())
            }
            StudyError::LimitExceeded { .. } => Self::new(StatusCode::CONFLICT, e.to_string()),
            StudyError::IoError { .. } | StudyError::SerializationError(_) => Self::internal(e),
        }
    }
}

impl From<GenError> for ApiError {
    fn from(e: GenError) -> Self {
        match e {
            // Dispatch failures keep their own mapping.
            GenError::Goal(inner) => inner.into(),
            GenError::Study(inner) => inner.into(),
            other => Self::new(StatusCode::BAD_GATEWAY, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_errors_map_to_contract_codes() {
        let e: ApiError = GoalError::InvalidOrder { order: 0 }.into();
        assert_eq!(e.status, StatusCode::BAD_REQUEST);

        let e: ApiError = GoalError::NotFoundAtOrder { order: 3 }.into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);

        let e: ApiError = GoalError::LimitExceeded { limit: 20 }.into();
        assert_eq!(e.status, StatusCode::CONFLICT);
    }

    #[test]
    fn upload_ceiling_is_forbidden_but_content_ceiling_conflicts() {
        let e: ApiError = StudyError::LimitExceeded {
            kind: "upload",
            limit: 5,
        }
        .into();
        assert_eq!(e.status, StatusCode::FORBIDDEN);

        let e: ApiError = StudyError::LimitExceeded {
            kind: "quiz",
            limit: 15,
        }
        .into();
        assert_eq!(e.status, StatusCode::CONFLICT);
    }

    #[test]
    fn model_failures_are_bad_gateway() {
        let e: ApiError = GenError::Api {
            status: 500,
            message: "down".into(),
        }
        .into();
        assert_eq!(e.status, StatusCode::BAD_GATEWAY);
    }
}
