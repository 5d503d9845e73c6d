// quizzes.rs — Quiz generation: snapshot → model → merge-or-insert.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sp_study::{Quiz, QuizStore};

use crate::client::{GenerateRequest, ModelClient, UploadedDocument};
use crate::error::GenError;
use crate::parse::parse_model_output;
use crate::prompts;

/// The quiz fields the model is shown (brief of the internal record).
#[derive(Debug, Serialize)]
struct PreviousQuiz<'a> {
    id: Uuid,
    question: &'a str,
    options: &'a [String],
    correct: usize,
}

/// One model suggestion: a merge when `id` is present, otherwise new.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizSuggestion {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
}

/// Dispatch parsed suggestions into the quiz store.
pub fn apply_suggestions(
    quizzes: &QuizStore,
    user_id: Uuid,
    note_id: Uuid,
    suggestions: &[QuizSuggestion],
) -> Result<usize, GenError> {
    for suggestion in suggestions {
        match suggestion.id {
            Some(id) => {
                quizzes.update_content(
                    user_id,
                    id,
                    &suggestion.question,
                    &suggestion.options,
                    suggestion.correct,
                    Some(note_id),
                )?;
            }
            None => {
                quizzes.insert(&Quiz::new(
                    user_id,
                    suggestion.question.clone(),
                    suggestion.options.clone(),
                    suggestion.correct,
                    Some(note_id),
                ))?;
            }
        }
    }
    Ok(suggestions.len())
}

/// The full quiz generation step for one upload.
pub async fn generate_quizzes(
    model: &dyn ModelClient,
    quizzes: &QuizStore,
    user_id: Uuid,
    note_id: Uuid,
    document: UploadedDocument,
) -> Result<usize, GenError> {
    let previous = quizzes.list_by_user(user_id)?;
    let view: Vec<PreviousQuiz<'_>> = previous
        .iter()
        .map(|q| PreviousQuiz {
            id: q.id,
            question: &q.question,
            options: &q.options,
            correct: q.correct,
        })
        .collect();
    let prompt = prompts::quizzes(&serde_json::to_string(&view)?);

    let output = model
        .generate(GenerateRequest::with_document(prompt, document))
        .await?;
    let suggestions: Vec<QuizSuggestion> = parse_model_output(&output)?;

    let applied = apply_suggestions(quizzes, user_id, note_id, &suggestions)?;
    tracing::info!(user_id = %user_id, note_id = %note_id, applied, "quizzes generated");
    Ok(applied)
}
