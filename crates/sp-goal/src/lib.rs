//! # sp-goal
//!
//! Roadmap goal ordering and lifecycle for Studypath.
//!
//! A [`Goal`] is one roadmap item owned by one user. Within a user's set,
//! `order` values always form a dense 1..N sequence; the reconciler computes
//! the shift sets needed to keep that true under inserts, merges, and
//! deletes, and [`GoalService`] applies them under per-user mutual
//! exclusion so concurrent generation jobs cannot corrupt the sequence.
//!
//! ## Key components
//!
//! - [`Goal`] / [`GoalDraft`] — the persisted record and its input form
//! - [`reconcile`] — pure insert/delete planning (shift sets, completion
//!   inheritance)
//! - [`GoalStore`] — narrow persistence interface; [`JsonGoalStore`] is the
//!   JSON file-backed implementation
//! - [`GoalService`] — create/merge/delete/completion operations with the
//!   goal ceiling and per-user locking

pub mod error;
pub mod goal;
pub mod reconcile;
pub mod service;
pub mod store;

pub use error::GoalError;
pub use goal::{Goal, GoalDraft, MAX_GOALS};
pub use reconcile::{InsertKind, InsertPlan, SlotView};
pub use service::GoalService;
pub use store::{GoalStore, JsonGoalStore, OrderFilter};
