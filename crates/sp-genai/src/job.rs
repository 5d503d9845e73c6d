// job.rs — Fire-and-forget generation per upload.
//
// One upload fans out into three independent section tasks (goals,
// quizzes, pair puzzles). Each reports `done` or `failed` into the note
// ledger; a failure in one section doesn't stop the others, nothing is
// retried, and there is no cancellation — the client polls the note
// status to see the outcome. The inner spawn gives us a JoinHandle, so
// a panicking section is caught and still marked `failed`.

use std::future::Future;
use std::sync::Arc;

use uuid::Uuid;

use sp_goal::GoalService;
use sp_study::{GenerationStatus, NoteSection, NoteStore, PairPuzzleStore, QuizStore};

use crate::client::{ModelClient, UploadedDocument};
use crate::error::GenError;
use crate::{pairs, quizzes, roadmap};

/// Everything a generation job needs, injected once at daemon startup.
#[derive(Clone)]
pub struct GenerationContext {
    pub model: Arc<dyn ModelClient>,
    pub goals: Arc<GoalService>,
    pub quizzes: Arc<QuizStore>,
    pub pairs: Arc<PairPuzzleStore>,
    pub notes: Arc<NoteStore>,
}

/// Kick off all section generations for one upload. The returned handles
/// can be awaited (tests do); the daemon drops them.
pub fn spawn_generation(
    ctx: &GenerationContext,
    user_id: Uuid,
    note_id: Uuid,
    document: UploadedDocument,
) -> Vec<tokio::task::JoinHandle<()>> {
    let goals_task = {
        let c = ctx.clone();
        let doc = document.clone();
        watch_section(
            ctx.notes.clone(),
            user_id,
            note_id,
            NoteSection::Goals,
            async move {
                roadmap::generate_goals(c.model.as_ref(), &c.goals, user_id, note_id, doc).await
            },
        )
    };

    let quizzes_task = {
        let c = ctx.clone();
        let doc = document.clone();
        watch_section(
            ctx.notes.clone(),
            user_id,
            note_id,
            NoteSection::Quizzes,
            async move {
                quizzes::generate_quizzes(c.model.as_ref(), &c.quizzes, user_id, note_id, doc).await
            },
        )
    };

    let pairs_task = {
        let c = ctx.clone();
        watch_section(
            ctx.notes.clone(),
            user_id,
            note_id,
            NoteSection::Puzzles,
            async move {
                pairs::generate_pairs(c.model.as_ref(), &c.pairs, user_id, note_id, document).await
            },
        )
    };

    vec![goals_task, quizzes_task, pairs_task]
}

/// Run one section to completion and record its outcome.
fn watch_section<F>(
    notes: Arc<NoteStore>,
    user_id: Uuid,
    note_id: Uuid,
    section: NoteSection,
    generation: F,
) -> tokio::task::JoinHandle<()>
where
    F: Future<Output = Result<usize, GenError>> + Send + 'static,
{
    tokio::spawn(async move {
        let inner = tokio::spawn(generation);
        let status = match inner.await {
            Ok(Ok(applied)) => {
                tracing::info!(%user_id, %note_id, %section, applied, "generation done");
                GenerationStatus::Done
            }
            Ok(Err(e)) => {
                tracing::error!(%user_id, %note_id, %section, "generation failed: {e}");
                GenerationStatus::Failed
            }
            Err(e) => {
                tracing::error!(%user_id, %note_id, %section, "generation task died: {e}");
                GenerationStatus::Failed
            }
        };

        if let Err(e) = notes.mark_status(user_id, note_id, section, status) {
            tracing::error!(%user_id, %note_id, %section, "status update failed: {e}");
        }
    })
}
