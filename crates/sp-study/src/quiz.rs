// quiz.rs — Multiple-choice quizzes derived from uploaded material.
//
// Quizzes are only ever written by the generation adapter: a suggestion
// carrying an id merges into the existing record, one without an id
// inserts a new quiz (ceiling-checked).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StudyError;
use crate::jsonl;

/// Maximum quizzes a single user may hold.
pub const MAX_QUIZZES: usize = 15;

/// One multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    pub fn new(
        user_id: Uuid,
        question: impl Into<String>,
        options: Vec<String>,
        correct: usize,
        note_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            question: question.into(),
            options,
            correct,
            note_id,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), StudyError> {
        if self.question.trim().is_empty() {
            return Err(StudyError::Validation("question must not be empty".into()));
        }
        if self.options.is_empty() {
            return Err(StudyError::Validation("options must not be empty".into()));
        }
        if self.correct >= self.options.len() {
            return Err(StudyError::Validation(format!(
                "correct index {} out of range for {} options",
                self.correct,
                self.options.len()
            )));
        }
        Ok(())
    }
}

/// JSONL file-backed quiz store, one file per user.
pub struct QuizStore {
    store_dir: PathBuf,
}

impl QuizStore {
    pub fn new(store_dir: impl AsRef<Path>) -> Result<Self, StudyError> {
        Ok(Self {
            store_dir: jsonl::create_dir(store_dir)?,
        })
    }

    fn path(&self, user_id: Uuid) -> PathBuf {
        jsonl::user_file(&self.store_dir, user_id)
    }

    /// A user's quizzes, oldest first.
    pub fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Quiz>, StudyError> {
        jsonl::read_records(&self.path(user_id))
    }

    pub fn count_by_user(&self, user_id: Uuid) -> Result<usize, StudyError> {
        Ok(self.list_by_user(user_id)?.len())
    }

    /// Insert a new quiz, enforcing the per-user ceiling.
    pub fn insert(&self, quiz: &Quiz) -> Result<(), StudyError> {
        quiz.validate()?;
        if self.count_by_user(quiz.user_id)? >= MAX_QUIZZES {
            return Err(StudyError::LimitExceeded {
                kind: "quiz",
                limit: MAX_QUIZZES,
            });
        }
        jsonl::append_record(&self.path(quiz.user_id), quiz)
    }

    /// Merge updated content into an existing quiz, keeping its id.
    pub fn update_content(
        &self,
        user_id: Uuid,
        id: Uuid,
        question: &str,
        options: &[String],
        correct: usize,
        note_id: Option<Uuid>,
    ) -> Result<Quiz, StudyError> {
        let mut quizzes: Vec<Quiz> = jsonl::read_records(&self.path(user_id))?;
        let quiz = quizzes
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(StudyError::NotFound(id))?;

        quiz.question = question.to_string();
        quiz.options = options.to_vec();
        quiz.correct = correct;
        if note_id.is_some() {
            quiz.note_id = note_id;
        }
        quiz.validate()?;

        let updated = quiz.clone();
        jsonl::rewrite_records(&self.path(user_id), &quizzes)?;
        Ok(updated)
    }

    /// Remove every quiz produced from the given upload.
    pub fn delete_by_note(&self, user_id: Uuid, note_id: Uuid) -> Result<usize, StudyError> {
        let quizzes: Vec<Quiz> = jsonl::read_records(&self.path(user_id))?;
        let original_len = quizzes.len();
        let remaining: Vec<Quiz> = quizzes
            .into_iter()
            .filter(|q| q.note_id != Some(note_id))
            .collect();
        let removed = original_len - remaining.len();
        if removed > 0 {
            jsonl::rewrite_records(&self.path(user_id), &remaining)?;
        }
        Ok(removed)
    }
}
