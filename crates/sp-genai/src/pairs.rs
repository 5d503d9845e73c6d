// pairs.rs — Matching-pair puzzle generation: snapshot → model →
// merge-or-insert.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sp_study::{Pair, PairPuzzle, PairPuzzleStore};

use crate::client::{GenerateRequest, ModelClient, UploadedDocument};
use crate::error::GenError;
use crate::parse::parse_model_output;
use crate::prompts;

#[derive(Debug, Serialize)]
struct PreviousPuzzle<'a> {
    id: Uuid,
    pairs: &'a [Pair],
}

/// One model suggestion: a merge when `id` is present, otherwise new.
#[derive(Debug, Clone, Deserialize)]
pub struct PairSuggestion {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub pairs: Vec<Pair>,
}

/// Dispatch parsed suggestions into the puzzle store.
pub fn apply_suggestions(
    puzzles: &PairPuzzleStore,
    user_id: Uuid,
    note_id: Uuid,
    suggestions: &[PairSuggestion],
) -> Result<usize, GenError> {
    for suggestion in suggestions {
        match suggestion.id {
            Some(id) => {
                puzzles.update_pairs(user_id, id, &suggestion.pairs, Some(note_id))?;
            }
            None => {
                puzzles.insert(&PairPuzzle::new(
                    user_id,
                    suggestion.pairs.clone(),
                    Some(note_id),
                ))?;
            }
        }
    }
    Ok(suggestions.len())
}

/// The full pair-puzzle generation step for one upload.
pub async fn generate_pairs(
    model: &dyn ModelClient,
    puzzles: &PairPuzzleStore,
    user_id: Uuid,
    note_id: Uuid,
    document: UploadedDocument,
) -> Result<usize, GenError> {
    let previous = puzzles.list_by_user(user_id)?;
    let view: Vec<PreviousPuzzle<'_>> = previous
        .iter()
        .map(|p| PreviousPuzzle {
            id: p.id,
            pairs: &p.pairs,
        })
        .collect();
    let prompt = prompts::pairs(&serde_json::to_string(&view)?);

    let output = model
        .generate(GenerateRequest::with_document(prompt, document))
        .await?;
    let suggestions: Vec<PairSuggestion> = parse_model_output(&output)?;

    let applied = apply_suggestions(puzzles, user_id, note_id, &suggestions)?;
    tracing::info!(user_id = %user_id, note_id = %note_id, applied, "pair puzzles generated");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn pairs() -> Vec<Pair> {
        vec![Pair {
            left: "mitosis".into(),
            right: "cell division".into(),
        }]
    }

    #[test]
    fn new_suggestion_inserts() {
        let dir = tempdir().unwrap();
        let store = PairPuzzleStore::new(dir.path().join("pairs")).unwrap();
        let user = Uuid::new_v4();

        apply_suggestions(
            &store,
            user,
            Uuid::new_v4(),
            &[PairSuggestion {
                id: None,
                pairs: pairs(),
            }],
        )
        .unwrap();
        assert_eq!(store.list_by_user(user).unwrap().len(), 1);
    }

    #[test]
    fn id_bearing_suggestion_replaces_pairs() {
        let dir = tempdir().unwrap();
        let store = PairPuzzleStore::new(dir.path().join("pairs")).unwrap();
        let user = Uuid::new_v4();
        let puzzle = PairPuzzle::new(user, pairs(), None);
        store.insert(&puzzle).unwrap();

        let new_pairs = vec![Pair {
            left: "ATP".into(),
            right: "energy carrier".into(),
        }];
        apply_suggestions(
            &store,
            user,
            Uuid::new_v4(),
            &[PairSuggestion {
                id: Some(puzzle.id),
                pairs: new_pairs.clone(),
            }],
        )
        .unwrap();

        let listed = store.list_by_user(user).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].pairs, new_pairs);
    }
}
