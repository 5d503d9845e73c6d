// routes/study.rs — Flashcard endpoints: direct CRUD plus
// generate-from-topic.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sp_genai::flashcards::{generate_flashcards, MAX_CARDS_PER_REQUEST};
use sp_study::{Flashcard, FlashcardDraft, FlashcardUpdate};

use crate::error::ApiError;
use crate::extract::AuthedUser;
use crate::state::AppState;

use super::envelope;

#[derive(Debug, Serialize)]
pub struct CardView {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl From<Flashcard> for CardView {
    fn from(c: Flashcard) -> Self {
        Self {
            id: c.id,
            front: c.front,
            back: c.back,
            section: c.section,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub section: Option<String>,
}

pub async fn list(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    // "all" means no filter, matching the dashboard's default tab.
    let section = query
        .section
        .as_deref()
        .filter(|s| !s.is_empty() && *s != "all");
    let cards: Vec<CardView> = state
        .flashcards
        .list(user_id, section)?
        .into_iter()
        .map(CardView::from)
        .collect();
    Ok(envelope("Flashcards retrieved successfully", cards).into_response())
}

pub async fn create(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    Json(draft): Json<FlashcardDraft>,
) -> Result<Response, ApiError> {
    let card = state.flashcards.create(user_id, &draft)?;
    Ok((
        StatusCode::CREATED,
        envelope("Flashcard created successfully", CardView::from(card)),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct BatchBody {
    pub cards: Vec<CardFields>,
    #[serde(default)]
    pub section: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CardFields {
    pub front: String,
    pub back: String,
}

pub async fn create_batch(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    Json(body): Json<BatchBody>,
) -> Result<Response, ApiError> {
    let drafts: Vec<FlashcardDraft> = body
        .cards
        .into_iter()
        .map(|c| FlashcardDraft {
            front: c.front,
            back: c.back,
            section: body.section.clone(),
        })
        .collect();

    let cards: Vec<CardView> = state
        .flashcards
        .create_batch(user_id, &drafts)?
        .into_iter()
        .map(CardView::from)
        .collect();
    Ok((
        StatusCode::CREATED,
        envelope("Flashcards created successfully", cards),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct TopicBody {
    pub topic: String,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub section: Option<String>,
}

/// Generate flashcards for a topic via the model, then store them.
pub async fn create_from_topic(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    Json(body): Json<TopicBody>,
) -> Result<Response, ApiError> {
    let topic = body.topic.trim();
    if topic.is_empty() {
        return Err(ApiError::bad_request("topic is required"));
    }
    let count = body.count.unwrap_or(1);
    if count == 0 || count > MAX_CARDS_PER_REQUEST {
        return Err(ApiError::bad_request(format!(
            "count must be between 1 and {MAX_CARDS_PER_REQUEST}"
        )));
    }

    let section = body
        .section
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let drafts = generate_flashcards(state.model.as_ref(), topic, count, section).await?;

    let cards: Vec<CardView> = state
        .flashcards
        .create_batch(user_id, &drafts)?
        .into_iter()
        .map(CardView::from)
        .collect();
    Ok((
        StatusCode::CREATED,
        envelope("Flashcards generated successfully", cards),
    )
        .into_response())
}

pub async fn get_card(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let card = state
        .flashcards
        .get(user_id, id)?
        .ok_or_else(|| ApiError::not_found("flashcard not found"))?;
    Ok(envelope("Flashcard retrieved successfully", CardView::from(card)).into_response())
}

pub async fn update(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<FlashcardUpdate>,
) -> Result<Response, ApiError> {
    let card = state.flashcards.update(user_id, id, &update)?;
    Ok(envelope("Flashcard updated successfully", CardView::from(card)).into_response())
}

pub async fn remove(
    AuthedUser(user_id): AuthedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    if !state.flashcards.delete(user_id, id)? {
        return Err(ApiError::not_found("flashcard not found"));
    }
    Ok(envelope("Flashcard was deleted", ()).into_response())
}
