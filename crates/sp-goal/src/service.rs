// service.rs — GoalService: the goal lifecycle controller.
//
// All mutation of a user's goal sequence funnels through here, under a
// per-user lock. Concurrent generation jobs and direct requests for the
// same user serialize on that lock; different users never contend. The
// lock is held across read → plan → apply so two inserts can't compute
// conflicting shift sets.
//
// The merge operation is a single locked batch that preserves the goal's
// identity (update-in-place). It produces the same orders and inherited
// completion the insert-new-then-delete-old sequence would, without the
// window where both copies exist.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::error::GoalError;
use crate::goal::{Goal, GoalDraft, MAX_GOALS};
use crate::reconcile::{self, InsertKind, SlotView};
use crate::store::{GoalStore, OrderFilter};

/// Goal lifecycle controller: ceiling enforcement, order reconciliation,
/// completion updates.
pub struct GoalService {
    store: Arc<dyn GoalStore>,
    user_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl GoalService {
    pub fn new(store: Arc<dyn GoalStore>) -> Self {
        Self {
            store,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The lock serializing all mutations for one user.
    fn user_lock(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self
            .user_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(user_id).or_default().clone()
    }

    /// All goals for the user, ascending by order.
    pub fn list_goals(&self, user_id: Uuid) -> Result<Vec<Goal>, GoalError> {
        self.store.find_ordered_by_user(user_id)
    }

    pub fn goal_count(&self, user_id: Uuid) -> Result<usize, GoalError> {
        self.store.count_by_user(user_id)
    }

    /// Create a goal at the requested order.
    ///
    /// Rejects with [`GoalError::LimitExceeded`] when the user already
    /// holds [`MAX_GOALS`] goals (checked against the pre-insertion
    /// count). The new goal is never completed, whatever slot it lands
    /// in.
    pub fn create_goal(
        &self,
        user_id: Uuid,
        draft: &GoalDraft,
        note_id: Option<Uuid>,
    ) -> Result<Goal, GoalError> {
        draft.validate()?;

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        if self.store.count_by_user(user_id)? >= MAX_GOALS {
            return Err(GoalError::LimitExceeded { limit: MAX_GOALS });
        }

        let existing = self.store.find_ordered_by_user(user_id)?;
        let slots: Vec<SlotView> = existing.iter().map(SlotView::from).collect();
        let plan = reconcile::plan_insert(&slots, draft.order, InsertKind::New)?;

        if let Some(from) = plan.shift_from {
            self.store
                .shift_orders(user_id, OrderFilter::AtOrAfter(from), 1)?;
        }

        let goal = Goal::new(
            user_id,
            plan.resolved_order,
            draft.title.trim(),
            draft.brief.trim(),
            plan.completed,
            note_id,
        );
        self.store.insert(&goal)?;

        tracing::debug!(
            user_id = %user_id,
            goal_id = %goal.id,
            order = goal.order,
            "goal created"
        );
        Ok(goal)
    }

    /// Merge an AI-suggested update into an existing goal.
    ///
    /// The goal keeps its id; title, brief, order, and the note
    /// back-reference are replaced. The completion flag is inherited
    /// from whichever goal occupied the requested slot before the merge
    /// (or false when appending past the end). Ordering outcome matches
    /// inserting the updated goal and then deleting the old slot, done
    /// as one batch under the user lock.
    pub fn merge_goal(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        draft: &GoalDraft,
        note_id: Option<Uuid>,
    ) -> Result<Goal, GoalError> {
        draft.validate()?;

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut goals = self.store.find_ordered_by_user(user_id)?;
        if !goals.iter().any(|g| g.id == goal_id) {
            return Err(GoalError::NotFound(goal_id));
        }

        let slots: Vec<SlotView> = goals.iter().map(SlotView::from).collect();
        let plan = reconcile::plan_insert(&slots, draft.order, InsertKind::Merged)?;

        // Phase 1 — the insert shift, with the old copy still in place.
        if let Some(from) = plan.shift_from {
            for g in goals.iter_mut() {
                if g.order >= from {
                    g.order += 1;
                }
            }
        }

        // Phase 2 — removing the old copy shifts everything past its
        // (now adjusted) slot down, the merged goal included.
        let old_order = goals
            .iter()
            .find(|g| g.id == goal_id)
            .map(|g| g.order)
            .ok_or(GoalError::NotFound(goal_id))?;
        let mut merged_order = plan.resolved_order;
        for g in goals.iter_mut() {
            if g.order > old_order {
                g.order -= 1;
            }
        }
        if merged_order > old_order {
            merged_order -= 1;
        }

        // Apply: rewrite every record whose order moved, then the merged
        // record itself.
        let mut merged = None;
        for g in goals.into_iter() {
            if g.id == goal_id {
                let mut updated = g;
                updated.order = merged_order;
                updated.title = draft.title.trim().to_string();
                updated.brief = draft.brief.trim().to_string();
                updated.completed = plan.completed;
                if note_id.is_some() {
                    updated.note_id = note_id;
                }
                updated.updated_at = chrono::Utc::now();
                self.store.update(&updated)?;
                merged = Some(updated);
            } else {
                self.store.update(&g)?;
            }
        }

        let merged = merged.ok_or(GoalError::NotFound(goal_id))?;
        tracing::debug!(
            user_id = %user_id,
            goal_id = %goal_id,
            order = merged.order,
            "goal merged"
        );
        Ok(merged)
    }

    /// Delete a goal by id and close the gap it leaves.
    pub fn delete_goal_by_id(&self, user_id: Uuid, goal_id: Uuid) -> Result<(), GoalError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let goal = self
            .store
            .get_by_id(goal_id, user_id)?
            .ok_or(GoalError::NotFound(goal_id))?;
        self.remove_and_reindex(&goal)
    }

    /// Delete the goal at `order` and close the gap it leaves.
    pub fn delete_goal_by_order(&self, user_id: Uuid, order: u32) -> Result<(), GoalError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let goal = self
            .store
            .get_by_order(user_id, order)?
            .ok_or(GoalError::NotFoundAtOrder { order })?;
        self.remove_and_reindex(&goal)
    }

    fn remove_and_reindex(&self, goal: &Goal) -> Result<(), GoalError> {
        self.store.delete_by_id_and_user(goal.id, goal.user_id)?;
        let plan = reconcile::plan_delete(goal.order);
        self.store
            .shift_orders(goal.user_id, OrderFilter::After(plan.shift_after), -1)?;
        tracing::debug!(user_id = %goal.user_id, goal_id = %goal.id, "goal deleted");
        Ok(())
    }

    /// Update completion at `order`.
    ///
    /// Marking complete touches only that goal. Marking incomplete
    /// cascades: every goal at or after `order` becomes incomplete,
    /// since progress past an unfinished goal is no longer guaranteed.
    pub fn set_completion(
        &self,
        user_id: Uuid,
        order: u32,
        completed: bool,
    ) -> Result<(), GoalError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        if self.store.get_by_order(user_id, order)?.is_none() {
            return Err(GoalError::NotFoundAtOrder { order });
        }

        let filter = if completed {
            OrderFilter::Exactly(order)
        } else {
            OrderFilter::AtOrAfter(order)
        };
        self.store.set_completed(user_id, filter, completed)?;
        Ok(())
    }

    /// Delete every goal the given upload produced, closing each gap.
    ///
    /// Used when a note is removed from the ledger.
    pub fn delete_goals_for_note(&self, user_id: Uuid, note_id: Uuid) -> Result<usize, GoalError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        // Delete highest-order first so earlier shifts don't disturb the
        // remaining targets.
        let mut targets: Vec<Goal> = self
            .store
            .find_ordered_by_user(user_id)?
            .into_iter()
            .filter(|g| g.note_id == Some(note_id))
            .collect();
        targets.sort_by(|a, b| b.order.cmp(&a.order));

        let removed = targets.len();
        for goal in targets {
            self.remove_and_reindex(&goal)?;
        }
        Ok(removed)
    }
}
