//! # sp-study
//!
//! Supplemental content domains for Studypath: flashcards, quizzes,
//! matching-pair puzzles, study sessions, crossword shapes, and the
//! per-user note (upload) ledger with generation-status tracking.
//!
//! Everything here is deliberately thin CRUD over JSON-file stores; the
//! ordering core lives in `sp-goal`.

pub mod crossword;
pub mod error;
pub mod flashcard;
mod jsonl;
pub mod note;
pub mod pairs;
pub mod quiz;
pub mod session;

pub use crossword::Crossword;
pub use error::StudyError;
pub use flashcard::{Flashcard, FlashcardDraft, FlashcardStore, FlashcardUpdate};
pub use note::{GenerationStatus, Note, NoteSection, NoteStatus, NoteStore, MAX_UPLOADS};
pub use pairs::{Pair, PairPuzzle, PairPuzzleStore, MAX_PAIR_PUZZLES};
pub use quiz::{Quiz, QuizStore, MAX_QUIZZES};
pub use session::{SessionDraft, SessionRecord, SessionStore};
