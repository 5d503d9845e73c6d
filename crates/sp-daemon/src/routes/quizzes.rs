// routes/quizzes.rs — Quiz listing (quizzes are only written by the
// generation adapter).

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use sp_study::Quiz;

use crate::error::ApiError;
use crate::extract::AuthedUser;
use crate::state::AppState;

use super::envelope;

#[derive(Debug, Serialize)]
pub struct QuizView {
    pub id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<Uuid>,
}

impl From<Quiz> for QuizView {
    fn from(q: Quiz) -> Self {
        Self {
            id: q.id,
            question: q.question,
            options: q.options,
            correct: q.correct,
            note_id: q.note_id,
        }
    }
}

pub async fn list(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let quizzes: Vec<QuizView> = state
        .quizzes
        .list_by_user(user_id)?
        .into_iter()
        .map(QuizView::from)
        .collect();
    Ok(envelope("Quizzes retrieved successfully", quizzes).into_response())
}
