// store.rs — GoalStore: persistence for goal records.
//
// The default backing is a directory of JSON files, one per goal:
// `<store_dir>/<goal_id>.json`. This keeps records isolated and easy to
// inspect manually. Bulk order/completion updates scan the directory and
// rewrite matching records; atomicity across a shift set is the
// service's responsibility (it holds the user lock while applying).

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::GoalError;
use crate::goal::Goal;

/// Order predicate for bulk updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFilter {
    /// Matches exactly one order.
    Exactly(u32),
    /// Matches every order >= the bound.
    AtOrAfter(u32),
    /// Matches every order > the bound.
    After(u32),
}

impl OrderFilter {
    pub fn matches(self, order: u32) -> bool {
        match self {
            OrderFilter::Exactly(k) => order == k,
            OrderFilter::AtOrAfter(k) => order >= k,
            OrderFilter::After(k) => order > k,
        }
    }
}

/// Narrow persistence interface the goal service works against.
///
/// The document store is an external collaborator; tests and alternative
/// backends implement this trait.
pub trait GoalStore: Send + Sync {
    /// All goals for a user, ascending by order.
    fn find_ordered_by_user(&self, user_id: Uuid) -> Result<Vec<Goal>, GoalError>;

    /// Persist a new goal record.
    fn insert(&self, goal: &Goal) -> Result<(), GoalError>;

    /// Rewrite an existing goal record (matched by id).
    fn update(&self, goal: &Goal) -> Result<(), GoalError>;

    /// Add `delta` to the order of every goal of `user_id` matching
    /// `filter`. Returns how many records changed.
    fn shift_orders(
        &self,
        user_id: Uuid,
        filter: OrderFilter,
        delta: i32,
    ) -> Result<usize, GoalError>;

    /// Set the completion flag on every goal of `user_id` matching
    /// `filter`. Returns how many records changed.
    fn set_completed(
        &self,
        user_id: Uuid,
        filter: OrderFilter,
        completed: bool,
    ) -> Result<usize, GoalError>;

    /// Remove a goal by id, scoped to the user. Returns whether a record
    /// was removed.
    fn delete_by_id_and_user(&self, id: Uuid, user_id: Uuid) -> Result<bool, GoalError>;

    /// Number of goals the user currently holds.
    fn count_by_user(&self, user_id: Uuid) -> Result<usize, GoalError>;

    /// Fetch one goal by id, scoped to the user.
    fn get_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Goal>, GoalError>;

    /// Fetch the goal at `order`, if any.
    fn get_by_order(&self, user_id: Uuid, order: u32) -> Result<Option<Goal>, GoalError>;
}

/// JSON file-backed goal store: one file per goal.
pub struct JsonGoalStore {
    store_dir: PathBuf,
}

impl JsonGoalStore {
    /// Create a store backed by the given directory.
    /// Creates the directory if it doesn't exist.
    pub fn new(store_dir: impl AsRef<Path>) -> Result<Self, GoalError> {
        let store_dir = store_dir.as_ref().to_path_buf();
        fs::create_dir_all(&store_dir).map_err(|source| GoalError::IoError {
            path: store_dir.display().to_string(),
            source,
        })?;
        Ok(Self { store_dir })
    }

    fn goal_file(&self, id: Uuid) -> PathBuf {
        self.store_dir.join(format!("{}.json", id))
    }

    fn write(&self, goal: &Goal) -> Result<(), GoalError> {
        let path = self.goal_file(goal.id);
        let json = serde_json::to_string_pretty(goal)?;
        fs::write(&path, json).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }

    /// All goals in the store, any user, unsorted.
    fn load_all(&self) -> Result<Vec<Goal>, GoalError> {
        let mut goals = Vec::new();

        let entries = fs::read_dir(&self.store_dir).map_err(|source| GoalError::IoError {
            path: self.store_dir.display().to_string(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| GoalError::IoError {
                path: self.store_dir.display().to_string(),
                source,
            })?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                let json = fs::read_to_string(&path).map_err(|source| GoalError::IoError {
                    path: path.display().to_string(),
                    source,
                })?;
                if let Ok(goal) = serde_json::from_str::<Goal>(&json) {
                    goals.push(goal);
                }
            }
        }

        Ok(goals)
    }

    fn load_user(&self, user_id: Uuid) -> Result<Vec<Goal>, GoalError> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|g| g.user_id == user_id)
            .collect())
    }
}

impl GoalStore for JsonGoalStore {
    fn find_ordered_by_user(&self, user_id: Uuid) -> Result<Vec<Goal>, GoalError> {
        let mut goals = self.load_user(user_id)?;
        goals.sort_by_key(|g| g.order);
        Ok(goals)
    }

    fn insert(&self, goal: &Goal) -> Result<(), GoalError> {
        self.write(goal)
    }

    fn update(&self, goal: &Goal) -> Result<(), GoalError> {
        self.write(goal)
    }

    fn shift_orders(
        &self,
        user_id: Uuid,
        filter: OrderFilter,
        delta: i32,
    ) -> Result<usize, GoalError> {
        let mut changed = 0;
        for mut goal in self.load_user(user_id)? {
            if filter.matches(goal.order) {
                goal.order = (goal.order as i64 + delta as i64) as u32;
                self.write(&goal)?;
                changed += 1;
            }
        }
        Ok(changed)
    }

    fn set_completed(
        &self,
        user_id: Uuid,
        filter: OrderFilter,
        completed: bool,
    ) -> Result<usize, GoalError> {
        let mut changed = 0;
        for mut goal in self.load_user(user_id)? {
            if filter.matches(goal.order) && goal.completed != completed {
                goal.completed = completed;
                goal.updated_at = chrono::Utc::now();
                self.write(&goal)?;
                changed += 1;
            }
        }
        Ok(changed)
    }

    fn delete_by_id_and_user(&self, id: Uuid, user_id: Uuid) -> Result<bool, GoalError> {
        match self.get_by_id(id, user_id)? {
            None => Ok(false),
            Some(goal) => {
                let path = self.goal_file(goal.id);
                fs::remove_file(&path).map_err(|source| GoalError::IoError {
                    path: path.display().to_string(),
                    source,
                })?;
                Ok(true)
            }
        }
    }

    fn count_by_user(&self, user_id: Uuid) -> Result<usize, GoalError> {
        Ok(self.load_user(user_id)?.len())
    }

    fn get_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Goal>, GoalError> {
        let path = self.goal_file(id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let goal: Goal = serde_json::from_str(&json)?;
        Ok(Some(goal).filter(|g| g.user_id == user_id))
    }

    fn get_by_order(&self, user_id: Uuid, order: u32) -> Result<Option<Goal>, GoalError> {
        Ok(self
            .load_user(user_id)?
            .into_iter()
            .find(|g| g.order == order))
    }
}
