// session.rs — Study session results.
//
// A session records one practice run in a dashboard section: how many
// questions, how many correct, and when. Sessions are numbered per user
// per section (1, 2, 3, ...) in submission order.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StudyError;
use crate::jsonl;

/// One recorded study session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub section: String,
    /// 1-based sequence number within (user, section).
    pub number: u32,
    pub total: u32,
    pub correct: u32,
    pub completed_at: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Input form for recording a session.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionDraft {
    pub section: String,
    pub total: u32,
    pub correct: u32,
    pub completed_at: NaiveDate,
}

impl SessionDraft {
    /// `today` is passed in so callers (and tests) control the clock.
    pub fn validate(&self, today: NaiveDate) -> Result<(), StudyError> {
        if self.section.trim().is_empty() {
            return Err(StudyError::Validation("section must not be empty".into()));
        }
        if self.total == 0 {
            return Err(StudyError::Validation("total must be at least 1".into()));
        }
        if self.correct > self.total {
            return Err(StudyError::Validation(
                "correct cannot exceed total".into(),
            ));
        }
        if self.completed_at < today {
            return Err(StudyError::Validation(
                "completed_at cannot be in the past".into(),
            ));
        }
        Ok(())
    }
}

/// JSONL file-backed session store, one file per user.
pub struct SessionStore {
    store_dir: PathBuf,
}

impl SessionStore {
    pub fn new(store_dir: impl AsRef<Path>) -> Result<Self, StudyError> {
        Ok(Self {
            store_dir: jsonl::create_dir(store_dir)?,
        })
    }

    fn path(&self, user_id: Uuid) -> PathBuf {
        jsonl::user_file(&self.store_dir, user_id)
    }

    /// Record a session, assigning the next number for its section.
    pub fn add(
        &self,
        user_id: Uuid,
        draft: &SessionDraft,
        today: NaiveDate,
    ) -> Result<SessionRecord, StudyError> {
        draft.validate(today)?;

        let section = draft.section.trim().to_string();
        let number = self.next_number(user_id, &section)?;
        let record = SessionRecord {
            id: Uuid::new_v4(),
            user_id,
            section,
            number,
            total: draft.total,
            correct: draft.correct,
            completed_at: draft.completed_at,
            created_at: Utc::now(),
        };
        jsonl::append_record(&self.path(user_id), &record)?;
        Ok(record)
    }

    /// A user's sessions, ordered by section then number.
    pub fn list_by_user(&self, user_id: Uuid) -> Result<Vec<SessionRecord>, StudyError> {
        let mut records: Vec<SessionRecord> = jsonl::read_records(&self.path(user_id))?;
        records.sort_by(|a, b| a.section.cmp(&b.section).then(a.number.cmp(&b.number)));
        Ok(records)
    }

    fn next_number(&self, user_id: Uuid, section: &str) -> Result<u32, StudyError> {
        let records: Vec<SessionRecord> = jsonl::read_records(&self.path(user_id))?;
        Ok(records.iter().filter(|r| r.section == section).count() as u32 + 1)
    }
}
