// routes/notes.rs — Upload endpoints and the status-polling ledger.
//
// An upload registers a ledger entry and fires the background
// generation; the request returns 202 immediately with everything in
// `generating`. Deleting a note cascades into the artifacts it
// produced: goals are removed through the goal service so the order
// sequence stays dense, quizzes and pair puzzles are dropped directly.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use sp_genai::{spawn_generation, UploadedDocument};
use sp_study::{Note, NoteStatus};

use crate::error::ApiError;
use crate::extract::AuthedUser;
use crate::state::AppState;

use super::envelope;

#[derive(Debug, Serialize)]
pub struct NoteView {
    pub id: Uuid,
    pub filename: String,
    pub status: NoteStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Note> for NoteView {
    fn from(n: Note) -> Self {
        Self {
            id: n.id,
            filename: n.filename,
            status: n.status,
            created_at: n.created_at,
        }
    }
}

/// Pull the `file` part out of a multipart body.
pub(crate) async fn read_file_part(mut multipart: Multipart) -> Result<UploadedDocument, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|f| !f.is_empty())
            .ok_or_else(|| ApiError::bad_request("No selected file"))?;
        let mime_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read file: {e}")))?;

        if bytes.is_empty() {
            return Err(ApiError::bad_request("No selected file"));
        }

        return Ok(UploadedDocument {
            filename,
            mime_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::bad_request("No file part"))
}

pub async fn upload(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let document = read_file_part(multipart).await?;

    let note = state
        .notes
        .register(user_id, &document.filename, &document.bytes)?;

    spawn_generation(&state.generation_context(), user_id, note.id, document);
    tracing::info!(%user_id, note_id = %note.id, "upload accepted, generation started");

    Ok((
        StatusCode::ACCEPTED,
        envelope("File uploaded, generation started", NoteView::from(note)),
    )
        .into_response())
}

pub async fn list(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let notes: Vec<NoteView> = state
        .notes
        .list_by_user(user_id)?
        .into_iter()
        .map(NoteView::from)
        .collect();
    Ok(envelope("Notes retrieved successfully", notes).into_response())
}

pub async fn remove(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    if !state.notes.delete(user_id, note_id)? {
        return Err(ApiError::not_found("note does not exist for this user"));
    }

    let goals = state.goals.delete_goals_for_note(user_id, note_id)?;
    let quizzes = state.quizzes.delete_by_note(user_id, note_id)?;
    let puzzles = state.pairs.delete_by_note(user_id, note_id)?;
    tracing::info!(%user_id, %note_id, goals, quizzes, puzzles, "note deleted with cascade");

    Ok(envelope("Note was deleted", ()).into_response())
}
