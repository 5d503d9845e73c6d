// note.rs — The upload ledger: one entry per uploaded file, with
// per-section generation status.
//
// An upload fans out into several generation jobs (goals, quizzes,
// puzzles); each job reports its status back here, and clients poll the
// ledger to see `generating` turn into `done` or `failed`. Uploads are
// deduplicated by content hash and capped per user.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::StudyError;
use crate::jsonl;

/// Maximum uploads a single user may hold.
pub const MAX_UPLOADS: usize = 5;

/// State of one generation job for one upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Generating,
    Done,
    Failed,
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationStatus::Generating => write!(f, "generating"),
            GenerationStatus::Done => write!(f, "done"),
            GenerationStatus::Failed => write!(f, "failed"),
        }
    }
}

/// The artifact families derived from one upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteSection {
    Goals,
    Quizzes,
    Puzzles,
}

impl fmt::Display for NoteSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteSection::Goals => write!(f, "goals"),
            NoteSection::Quizzes => write!(f, "quizzes"),
            NoteSection::Puzzles => write!(f, "puzzles"),
        }
    }
}

/// Per-section status map for one upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteStatus {
    pub goals: GenerationStatus,
    pub quizzes: GenerationStatus,
    pub puzzles: GenerationStatus,
}

impl NoteStatus {
    fn generating() -> Self {
        Self {
            goals: GenerationStatus::Generating,
            quizzes: GenerationStatus::Generating,
            puzzles: GenerationStatus::Generating,
        }
    }

    pub fn get(&self, section: NoteSection) -> GenerationStatus {
        match section {
            NoteSection::Goals => self.goals,
            NoteSection::Quizzes => self.quizzes,
            NoteSection::Puzzles => self.puzzles,
        }
    }

    fn set(&mut self, section: NoteSection, status: GenerationStatus) {
        match section {
            NoteSection::Goals => self.goals = status,
            NoteSection::Quizzes => self.quizzes = status,
            NoteSection::Puzzles => self.puzzles = status,
        }
    }
}

/// One upload ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    /// SHA-256 hex digest of the file content.
    pub hash: String,
    pub status: NoteStatus,
    pub created_at: DateTime<Utc>,
}

/// JSONL file-backed note ledger, one file per user.
pub struct NoteStore {
    store_dir: PathBuf,
}

impl NoteStore {
    pub fn new(store_dir: impl AsRef<Path>) -> Result<Self, StudyError> {
        Ok(Self {
            store_dir: jsonl::create_dir(store_dir)?,
        })
    }

    fn path(&self, user_id: Uuid) -> PathBuf {
        jsonl::user_file(&self.store_dir, user_id)
    }

    /// Register an upload: enforce the ceiling, reject duplicate
    /// content, and start all sections in `generating`.
    pub fn register(
        &self,
        user_id: Uuid,
        filename: &str,
        content: &[u8],
    ) -> Result<Note, StudyError> {
        if filename.trim().is_empty() {
            return Err(StudyError::Validation("filename must not be empty".into()));
        }

        let notes: Vec<Note> = jsonl::read_records(&self.path(user_id))?;
        if notes.len() >= MAX_UPLOADS {
            return Err(StudyError::LimitExceeded {
                kind: "upload",
                limit: MAX_UPLOADS,
            });
        }

        let hash = format!("{:x}", Sha256::digest(content));
        if notes.iter().any(|n| n.hash == hash) {
            return Err(StudyError::DuplicateUpload);
        }

        let note = Note {
            id: Uuid::new_v4(),
            user_id,
            filename: filename.to_string(),
            hash,
            status: NoteStatus::generating(),
            created_at: Utc::now(),
        };
        jsonl::append_record(&self.path(user_id), &note)?;
        Ok(note)
    }

    /// A user's uploads, oldest first.
    pub fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Note>, StudyError> {
        jsonl::read_records(&self.path(user_id))
    }

    pub fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<Note>, StudyError> {
        Ok(self.list_by_user(user_id)?.into_iter().find(|n| n.id == id))
    }

    /// Update one section's status on one upload.
    pub fn mark_status(
        &self,
        user_id: Uuid,
        note_id: Uuid,
        section: NoteSection,
        status: GenerationStatus,
    ) -> Result<(), StudyError> {
        let mut notes: Vec<Note> = jsonl::read_records(&self.path(user_id))?;
        let note = notes
            .iter_mut()
            .find(|n| n.id == note_id)
            .ok_or(StudyError::NotFound(note_id))?;
        note.status.set(section, status);
        jsonl::rewrite_records(&self.path(user_id), &notes)
    }

    /// Remove an upload from the ledger. Returns whether one was removed.
    pub fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, StudyError> {
        let notes: Vec<Note> = jsonl::read_records(&self.path(user_id))?;
        let original_len = notes.len();
        let remaining: Vec<Note> = notes.into_iter().filter(|n| n.id != id).collect();
        if remaining.len() == original_len {
            return Ok(false);
        }
        jsonl::rewrite_records(&self.path(user_id), &remaining)?;
        Ok(true)
    }

    /// id → filename map, used to label artifacts with their source file.
    pub fn filename_index(&self, user_id: Uuid) -> Result<HashMap<Uuid, String>, StudyError> {
        Ok(self
            .list_by_user(user_id)?
            .into_iter()
            .map(|n| (n.id, n.filename))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn register_starts_all_sections_generating() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("notes")).unwrap();
        let user = Uuid::new_v4();

        let note = store.register(user, "week1.pdf", b"lecture notes").unwrap();
        assert_eq!(note.status.goals, GenerationStatus::Generating);
        assert_eq!(note.status.quizzes, GenerationStatus::Generating);
        assert_eq!(note.status.puzzles, GenerationStatus::Generating);
    }

    #[test]
    fn duplicate_content_rejected() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("notes")).unwrap();
        let user = Uuid::new_v4();

        store.register(user, "a.pdf", b"same bytes").unwrap();
        let result = store.register(user, "b.pdf", b"same bytes");
        assert!(matches!(result, Err(StudyError::DuplicateUpload)));

        // A different user can upload the same content.
        assert!(store.register(Uuid::new_v4(), "c.pdf", b"same bytes").is_ok());
    }

    #[test]
    fn upload_ceiling_enforced() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("notes")).unwrap();
        let user = Uuid::new_v4();
        for i in 0..MAX_UPLOADS {
            store
                .register(user, &format!("f{i}.pdf"), format!("content {i}").as_bytes())
                .unwrap();
        }

        let result = store.register(user, "extra.pdf", b"one more");
        assert!(matches!(result, Err(StudyError::LimitExceeded { .. })));
    }

    #[test]
    fn mark_status_transitions_one_section() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("notes")).unwrap();
        let user = Uuid::new_v4();
        let note = store.register(user, "a.pdf", b"x").unwrap();

        store
            .mark_status(user, note.id, NoteSection::Goals, GenerationStatus::Done)
            .unwrap();
        store
            .mark_status(user, note.id, NoteSection::Quizzes, GenerationStatus::Failed)
            .unwrap();

        let reloaded = store.get(user, note.id).unwrap().unwrap();
        assert_eq!(reloaded.status.goals, GenerationStatus::Done);
        assert_eq!(reloaded.status.quizzes, GenerationStatus::Failed);
        assert_eq!(reloaded.status.puzzles, GenerationStatus::Generating);
    }

    #[test]
    fn mark_status_unknown_note_is_not_found() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("notes")).unwrap();
        let result = store.mark_status(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NoteSection::Goals,
            GenerationStatus::Done,
        );
        assert!(matches!(result, Err(StudyError::NotFound(_))));
    }

    #[test]
    fn delete_and_filename_index() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("notes")).unwrap();
        let user = Uuid::new_v4();
        let note = store.register(user, "a.pdf", b"x").unwrap();

        let index = store.filename_index(user).unwrap();
        assert_eq!(index.get(&note.id).map(String::as_str), Some("a.pdf"));

        assert!(store.delete(user, note.id).unwrap());
        assert!(!store.delete(user, note.id).unwrap());
    }
}
