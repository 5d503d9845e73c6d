// state.rs — Shared daemon state.
//
// Every handler sees the same set of stores, the goal service, and the
// model client. All dependencies are constructed here from config and
// passed in — nothing is a process-wide singleton, so tests build the
// same state over a tempdir with a canned model client.

use std::sync::Arc;

use sp_genai::{GeminiClient, GenerationContext, ModelClient};
use sp_goal::{GoalService, JsonGoalStore};
use sp_study::{FlashcardStore, NoteStore, PairPuzzleStore, QuizStore, SessionStore};

use crate::config::DaemonConfig;

#[derive(Clone)]
pub struct AppState {
    pub goals: Arc<GoalService>,
    pub flashcards: Arc<FlashcardStore>,
    pub quizzes: Arc<QuizStore>,
    pub pairs: Arc<PairPuzzleStore>,
    pub sessions: Arc<SessionStore>,
    pub notes: Arc<NoteStore>,
    pub model: Arc<dyn ModelClient>,
}

impl AppState {
    /// Build the production state: JSON stores under the data dir and a
    /// Gemini client from config.
    pub fn from_config(config: &DaemonConfig) -> anyhow::Result<Self> {
        let model = Arc::new(GeminiClient::new(
            &config.base_url,
            &config.model,
            &config.api_key,
        ));
        Self::with_model(config, model)
    }

    /// Build the state with an injected model client (tests use this).
    pub fn with_model(
        config: &DaemonConfig,
        model: Arc<dyn ModelClient>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            goals: Arc::new(GoalService::new(Arc::new(JsonGoalStore::new(
                &config.goals_dir,
            )?))),
            flashcards: Arc::new(FlashcardStore::new(&config.flashcards_dir)?),
            quizzes: Arc::new(QuizStore::new(&config.quizzes_dir)?),
            pairs: Arc::new(PairPuzzleStore::new(&config.pairs_dir)?),
            sessions: Arc::new(SessionStore::new(&config.sessions_dir)?),
            notes: Arc::new(NoteStore::new(&config.notes_dir)?),
            model,
        })
    }

    /// The slice of state the background generation jobs need.
    pub fn generation_context(&self) -> GenerationContext {
        GenerationContext {
            model: Arc::clone(&self.model),
            goals: Arc::clone(&self.goals),
            quizzes: Arc::clone(&self.quizzes),
            pairs: Arc::clone(&self.pairs),
            notes: Arc::clone(&self.notes),
        }
    }
}
