// pairs.rs — Matching-pair puzzles derived from uploaded material.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StudyError;
use crate::jsonl;

/// Maximum pair puzzles a single user may hold.
pub const MAX_PAIR_PUZZLES: usize = 15;

/// One left/right match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub left: String,
    pub right: String,
}

/// A matching puzzle: a set of pairs the user reassembles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairPuzzle {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pairs: Vec<Pair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl PairPuzzle {
    pub fn new(user_id: Uuid, pairs: Vec<Pair>, note_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            pairs,
            note_id,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), StudyError> {
        if self.pairs.is_empty() {
            return Err(StudyError::Validation("pairs must not be empty".into()));
        }
        if self
            .pairs
            .iter()
            .any(|p| p.left.trim().is_empty() || p.right.trim().is_empty())
        {
            return Err(StudyError::Validation(
                "pair sides must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// JSONL file-backed pair-puzzle store, one file per user.
pub struct PairPuzzleStore {
    store_dir: PathBuf,
}

impl PairPuzzleStore {
    pub fn new(store_dir: impl AsRef<Path>) -> Result<Self, StudyError> {
        Ok(Self {
            store_dir: jsonl::create_dir(store_dir)?,
        })
    }

    fn path(&self, user_id: Uuid) -> PathBuf {
        jsonl::user_file(&self.store_dir, user_id)
    }

    pub fn list_by_user(&self, user_id: Uuid) -> Result<Vec<PairPuzzle>, StudyError> {
        jsonl::read_records(&self.path(user_id))
    }

    pub fn count_by_user(&self, user_id: Uuid) -> Result<usize, StudyError> {
        Ok(self.list_by_user(user_id)?.len())
    }

    /// Insert a new puzzle, enforcing the per-user ceiling.
    pub fn insert(&self, puzzle: &PairPuzzle) -> Result<(), StudyError> {
        puzzle.validate()?;
        if self.count_by_user(puzzle.user_id)? >= MAX_PAIR_PUZZLES {
            return Err(StudyError::LimitExceeded {
                kind: "pair puzzle",
                limit: MAX_PAIR_PUZZLES,
            });
        }
        jsonl::append_record(&self.path(puzzle.user_id), puzzle)
    }

    /// Merge an updated pair set into an existing puzzle, keeping its id.
    pub fn update_pairs(
        &self,
        user_id: Uuid,
        id: Uuid,
        pairs: &[Pair],
        note_id: Option<Uuid>,
    ) -> Result<PairPuzzle, StudyError> {
        let mut puzzles: Vec<PairPuzzle> = jsonl::read_records(&self.path(user_id))?;
        let puzzle = puzzles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StudyError::NotFound(id))?;

        puzzle.pairs = pairs.to_vec();
        if note_id.is_some() {
            puzzle.note_id = note_id;
        }
        puzzle.validate()?;

        let updated = puzzle.clone();
        jsonl::rewrite_records(&self.path(user_id), &puzzles)?;
        Ok(updated)
    }

    /// Remove every puzzle produced from the given upload.
    pub fn delete_by_note(&self, user_id: Uuid, note_id: Uuid) -> Result<usize, StudyError> {
        let puzzles: Vec<PairPuzzle> = jsonl::read_records(&self.path(user_id))?;
        let original_len = puzzles.len();
        let remaining: Vec<PairPuzzle> = puzzles
            .into_iter()
            .filter(|p| p.note_id != Some(note_id))
            .collect();
        let removed = original_len - remaining.len();
        if removed > 0 {
            jsonl::rewrite_records(&self.path(user_id), &remaining)?;
        }
        Ok(removed)
    }
}
