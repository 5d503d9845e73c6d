// flashcard.rs — Flashcards: front/back study cards with an optional
// section tag.
//
// Cards are either typed in by the user or produced from a topic by the
// generation adapter; either way they arrive here as drafts.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StudyError;
use crate::jsonl;

/// One study card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub user_id: Uuid,
    pub front: String,
    pub back: String,
    /// Optional dashboard section tag (e.g., a course name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input form for creating a flashcard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcardDraft {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub section: Option<String>,
}

impl FlashcardDraft {
    pub fn validate(&self) -> Result<(), StudyError> {
        if self.front.trim().is_empty() || self.back.trim().is_empty() {
            return Err(StudyError::Validation(
                "front and back must not be empty".into(),
            ));
        }
        Ok(())
    }

    fn section_trimmed(&self) -> Option<String> {
        self.section
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Partial update for a flashcard.
///
/// Absent fields are left unchanged. A present-but-empty `section`
/// clears the tag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlashcardUpdate {
    pub front: Option<String>,
    pub back: Option<String>,
    pub section: Option<String>,
}

impl FlashcardUpdate {
    fn is_empty(&self) -> bool {
        self.front.is_none() && self.back.is_none() && self.section.is_none()
    }
}

/// JSONL file-backed flashcard store, one file per user.
pub struct FlashcardStore {
    store_dir: PathBuf,
}

impl FlashcardStore {
    pub fn new(store_dir: impl AsRef<Path>) -> Result<Self, StudyError> {
        Ok(Self {
            store_dir: jsonl::create_dir(store_dir)?,
        })
    }

    fn path(&self, user_id: Uuid) -> PathBuf {
        jsonl::user_file(&self.store_dir, user_id)
    }

    /// Create one card from a draft.
    pub fn create(&self, user_id: Uuid, draft: &FlashcardDraft) -> Result<Flashcard, StudyError> {
        draft.validate()?;
        let card = Flashcard {
            id: Uuid::new_v4(),
            user_id,
            front: draft.front.trim().to_string(),
            back: draft.back.trim().to_string(),
            section: draft.section_trimmed(),
            created_at: Utc::now(),
        };
        jsonl::append_record(&self.path(user_id), &card)?;
        Ok(card)
    }

    /// Create a batch of cards. Every draft is validated before any card
    /// is written, so a bad entry rejects the whole batch.
    pub fn create_batch(
        &self,
        user_id: Uuid,
        drafts: &[FlashcardDraft],
    ) -> Result<Vec<Flashcard>, StudyError> {
        if drafts.is_empty() {
            return Err(StudyError::Validation("no cards given".into()));
        }
        for draft in drafts {
            draft.validate()?;
        }

        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            created.push(self.create(user_id, draft)?);
        }
        Ok(created)
    }

    /// List a user's cards, optionally filtered to one section.
    pub fn list(&self, user_id: Uuid, section: Option<&str>) -> Result<Vec<Flashcard>, StudyError> {
        let cards: Vec<Flashcard> = jsonl::read_records(&self.path(user_id))?;
        Ok(match section {
            None => cards,
            Some(s) => cards
                .into_iter()
                .filter(|c| c.section.as_deref() == Some(s))
                .collect(),
        })
    }

    pub fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<Flashcard>, StudyError> {
        Ok(self.list(user_id, None)?.into_iter().find(|c| c.id == id))
    }

    /// Apply a partial update. Errors if the update carries no fields or
    /// the card doesn't exist for this user.
    pub fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: &FlashcardUpdate,
    ) -> Result<Flashcard, StudyError> {
        if update.is_empty() {
            return Err(StudyError::Validation("no fields to update".into()));
        }

        let mut cards: Vec<Flashcard> = jsonl::read_records(&self.path(user_id))?;
        let card = cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StudyError::NotFound(id))?;

        if let Some(front) = update.front.as_deref().map(str::trim) {
            if front.is_empty() {
                return Err(StudyError::Validation("front must not be empty".into()));
            }
            card.front = front.to_string();
        }
        if let Some(back) = update.back.as_deref().map(str::trim) {
            if back.is_empty() {
                return Err(StudyError::Validation("back must not be empty".into()));
            }
            card.back = back.to_string();
        }
        if let Some(section) = update.section.as_deref().map(str::trim) {
            // Empty string clears the tag.
            card.section = (!section.is_empty()).then(|| section.to_string());
        }

        let updated = card.clone();
        jsonl::rewrite_records(&self.path(user_id), &cards)?;
        Ok(updated)
    }

    /// Remove a card. Returns whether one was removed.
    pub fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, StudyError> {
        let cards: Vec<Flashcard> = jsonl::read_records(&self.path(user_id))?;
        let original_len = cards.len();
        let remaining: Vec<Flashcard> = cards.into_iter().filter(|c| c.id != id).collect();
        if remaining.len() == original_len {
            return Ok(false);
        }
        jsonl::rewrite_records(&self.path(user_id), &remaining)?;
        Ok(true)
    }
}
