// routes/pairs.rs — Pair-puzzle listing.
//
// Puzzles are served in shuffled order so the dashboard doesn't always
// open on the same one, and each carries the filename of the upload
// that produced it instead of the internal note id.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use rand::seq::SliceRandom;
use serde::Serialize;
use uuid::Uuid;

use sp_study::Pair;

use crate::error::ApiError;
use crate::extract::AuthedUser;
use crate::state::AppState;

use super::envelope;

#[derive(Debug, Serialize)]
pub struct PairPuzzleView {
    pub id: Uuid,
    pub pairs: Vec<Pair>,
    #[serde(rename = "sourceFileName", skip_serializing_if = "Option::is_none")]
    pub source_file_name: Option<String>,
}

pub async fn list(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let filenames = state.notes.filename_index(user_id)?;
    let mut puzzles: Vec<PairPuzzleView> = state
        .pairs
        .list_by_user(user_id)?
        .into_iter()
        .map(|p| PairPuzzleView {
            id: p.id,
            pairs: p.pairs,
            source_file_name: p.note_id.and_then(|id| filenames.get(&id).cloned()),
        })
        .collect();
    puzzles.shuffle(&mut rand::thread_rng());

    Ok(envelope("Puzzles retrieved successfully", puzzles).into_response())
}
