// routes/crossword.rs — Synchronous crossword generation.
//
// Unlike the upload-driven families there is no persistence and no
// background job: the file goes to the model, the shape-checked puzzle
// comes straight back, and a model failure is a 502.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use sp_genai::crossword::generate_crossword;

use crate::error::ApiError;
use crate::extract::AuthedUser;
use crate::state::AppState;

use super::envelope;
use super::notes::read_file_part;

pub async fn generate(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let document = read_file_part(multipart).await?;
    tracing::info!(%user_id, filename = %document.filename, "crossword generation requested");

    let crossword = generate_crossword(state.model.as_ref(), document).await?;
    Ok((
        StatusCode::CREATED,
        envelope("Crossword generated successfully", crossword),
    )
        .into_response())
}
