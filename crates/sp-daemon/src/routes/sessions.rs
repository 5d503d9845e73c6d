// routes/sessions.rs — Study session history.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use sp_study::{SessionDraft, SessionRecord};

use crate::error::ApiError;
use crate::extract::AuthedUser;
use crate::state::AppState;

use super::envelope;

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub section: String,
    pub number: u32,
    pub total: u32,
    pub correct: u32,
    pub completed_at: NaiveDate,
}

impl From<SessionRecord> for SessionView {
    fn from(s: SessionRecord) -> Self {
        Self {
            id: s.id,
            section: s.section,
            number: s.number,
            total: s.total,
            correct: s.correct,
            completed_at: s.completed_at,
        }
    }
}

pub async fn list(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let sessions: Vec<SessionView> = state
        .sessions
        .list_by_user(user_id)?
        .into_iter()
        .map(SessionView::from)
        .collect();
    Ok(envelope("Sessions retrieved successfully", sessions).into_response())
}

pub async fn add(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    Json(draft): Json<SessionDraft>,
) -> Result<Response, ApiError> {
    let today = Utc::now().date_naive();
    let record = state.sessions.add(user_id, &draft, today)?;
    Ok((
        StatusCode::CREATED,
        envelope("Session created successfully", SessionView::from(record)),
    )
        .into_response())
}
