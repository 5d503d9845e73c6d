// routes/goals.rs — Roadmap goal endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sp_goal::{Goal, GoalDraft};

use crate::error::ApiError;
use crate::extract::AuthedUser;
use crate::state::AppState;

use super::envelope;

/// A goal as the API exposes it: everything but the owning user.
#[derive(Debug, Serialize)]
pub struct GoalView {
    pub id: Uuid,
    pub order: u32,
    pub title: String,
    pub brief: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Goal> for GoalView {
    fn from(g: Goal) -> Self {
        Self {
            id: g.id,
            order: g.order,
            title: g.title,
            brief: g.brief,
            completed: g.completed,
            note_id: g.note_id,
            created_at: g.created_at,
        }
    }
}

pub async fn list(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let goals: Vec<GoalView> = state
        .goals
        .list_goals(user_id)?
        .into_iter()
        .map(GoalView::from)
        .collect();
    Ok(envelope("Goals retrieved successfully", goals).into_response())
}

pub async fn create(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    Json(draft): Json<GoalDraft>,
) -> Result<Response, ApiError> {
    let goal = state.goals.create_goal(user_id, &draft, None)?;
    Ok((
        StatusCode::CREATED,
        envelope("Goal created successfully", GoalView::from(goal)),
    )
        .into_response())
}

pub async fn remove(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    Path(order): Path<u32>,
) -> Result<Response, ApiError> {
    state.goals.delete_goal_by_order(user_id, order)?;
    Ok(envelope("Goal was deleted", ()).into_response())
}

#[derive(Debug, Deserialize)]
pub struct CompletionBody {
    pub completed: bool,
}

pub async fn set_completion(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    Path(order): Path<u32>,
    Json(body): Json<CompletionBody>,
) -> Result<Response, ApiError> {
    state.goals.set_completion(user_id, order, body.completed)?;
    Ok(envelope("Goal completion updated", ()).into_response())
}
