//! # sp-genai
//!
//! Content generation for Studypath: the adapter between uploaded study
//! material and the external generative model.
//!
//! The model is an external collaborator behind the [`ModelClient`]
//! trait; [`GeminiClient`] is the production implementation and tests
//! substitute fakes. The adapter serializes a snapshot of the user's
//! existing records, submits the uploaded document, parses the model's
//! JSON output, and dispatches each suggestion as a merge (id present)
//! or an insert (id absent) into the owning store.
//!
//! Generation runs fire-and-forget per upload (see [`job`]); the only
//! externally visible signal is the note's per-section status flipping
//! from `generating` to `done` or `failed`.

pub mod client;
pub mod crossword;
pub mod error;
pub mod flashcards;
pub mod job;
pub mod pairs;
pub mod parse;
pub mod prompts;
pub mod quizzes;
pub mod roadmap;

pub use client::{GeminiClient, GenerateRequest, ModelClient, UploadedDocument};
pub use error::GenError;
pub use job::{spawn_generation, GenerationContext};
