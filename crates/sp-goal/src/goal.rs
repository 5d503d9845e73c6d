// goal.rs — Goal: one roadmap item owned by one user.
//
// Within a user's set, `order` is a dense 1-based rank: after every
// mutation the orders are exactly {1..N}. The reconciler and service
// maintain that invariant; this module only defines the records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GoalError;

/// Maximum number of goals a single user may hold.
pub const MAX_GOALS: usize = 20;

/// A roadmap goal record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier, assigned at creation, immutable.
    pub id: Uuid,

    /// Owning user.
    pub user_id: Uuid,

    /// Dense 1-based rank within the user's goal set.
    pub order: u32,

    /// Short goal title.
    pub title: String,

    /// Short description of the goal.
    pub brief: String,

    /// Whether the user has completed this goal.
    pub completed: bool,

    /// The upload that produced or last updated this goal, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<Uuid>,

    /// When this goal was created.
    pub created_at: DateTime<Utc>,

    /// When this goal was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Create a new goal record with a fresh id.
    pub fn new(
        user_id: Uuid,
        order: u32,
        title: impl Into<String>,
        brief: impl Into<String>,
        completed: bool,
        note_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            order,
            title: title.into(),
            brief: brief.into(),
            completed,
            note_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input form for creating or merging a goal.
///
/// `order` is the requested insertion slot; the reconciler may clamp it.
/// The completion flag is never taken from the caller: new goals start
/// incomplete and merged goals inherit from the slot they land in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalDraft {
    pub order: u32,
    pub title: String,
    pub brief: String,
}

impl GoalDraft {
    /// Check field-level constraints. Ordering bounds are the
    /// reconciler's job; this only rejects empty text fields.
    pub fn validate(&self) -> Result<(), GoalError> {
        if self.title.trim().is_empty() {
            return Err(GoalError::Validation("title must not be empty".into()));
        }
        if self.brief.trim().is_empty() {
            return Err(GoalError::Validation("brief must not be empty".into()));
        }
        Ok(())
    }
}
