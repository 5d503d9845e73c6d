// reconcile.rs — Pure planning for order-preserving inserts and deletes.
//
// Given a user's current goal sequence (dense 1..N) and a requested
// insertion slot, compute the resolved order, the completion flag, and
// the shift set needed to keep the sequence dense. The planner never
// touches storage; the service applies the plan under the user's lock.
//
// Insert cases:
//   A — empty set: the candidate becomes order 1, nothing shifts.
//   B — requested slot strictly beyond one-past-the-end: clamp to N+1
//       (append), nothing shifts.
//   C — slot within 1..=N: everything at or past the slot shifts up one
//       and the candidate takes the slot.
//
// Completion follows the logical-progression rule: a goal landing on an
// occupied slot inherits that occupant's flag when it is a merge; a
// brand-new goal is never completed, and nothing appended past the end
// is completed either.

use crate::error::GoalError;
use crate::goal::Goal;

/// The slice of a goal the planner needs to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotView {
    pub order: u32,
    pub completed: bool,
}

impl From<&Goal> for SlotView {
    fn from(goal: &Goal) -> Self {
        Self {
            order: goal.order,
            completed: goal.completed,
        }
    }
}

/// Whether the candidate is a brand-new goal or a merge of an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertKind {
    /// Created directly by the user or suggested as new by the model.
    New,
    /// An AI-suggested update to an existing goal (identity preserved).
    Merged,
}

/// The writes an insert requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertPlan {
    /// The order the candidate actually takes (requested, or clamped to N+1).
    pub resolved_order: u32,

    /// The completion flag the candidate is stored with.
    pub completed: bool,

    /// `Some(k)`: increment the order of every existing goal with
    /// `order >= k` before inserting. `None`: nothing shifts.
    pub shift_from: Option<u32>,
}

/// Plan an insert into `existing`, which must be sorted ascending by
/// order and dense 1..N (precondition, not re-validated here).
pub fn plan_insert(
    existing: &[SlotView],
    requested_order: u32,
    kind: InsertKind,
) -> Result<InsertPlan, GoalError> {
    if requested_order == 0 {
        return Err(GoalError::InvalidOrder { order: 0 });
    }

    let len = existing.len() as u32;

    // Case A — first goal for this user.
    if len == 0 {
        return Ok(InsertPlan {
            resolved_order: 1,
            completed: false,
            shift_from: None,
        });
    }

    let last = existing[existing.len() - 1].order;

    // Case B — past one-past-the-end: append.
    if requested_order > last + 1 {
        return Ok(InsertPlan {
            resolved_order: last + 1,
            completed: false,
            shift_from: None,
        });
    }

    // Exactly one past the end: append without shifting.
    if requested_order == last + 1 {
        return Ok(InsertPlan {
            resolved_order: requested_order,
            completed: false,
            shift_from: None,
        });
    }

    // Case C — lands on an occupied slot.
    let completed = match kind {
        InsertKind::Merged => existing[(requested_order - 1) as usize].completed,
        InsertKind::New => false,
    };

    Ok(InsertPlan {
        resolved_order: requested_order,
        completed,
        shift_from: Some(requested_order),
    })
}

/// The writes a delete requires: every goal with `order > shift_after`
/// decrements by one once the goal itself is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePlan {
    pub shift_after: u32,
}

/// Plan the removal of the goal at `order`.
pub fn plan_delete(order: u32) -> DeletePlan {
    DeletePlan { shift_after: order }
}
