// roadmap.rs — Roadmap goal generation: snapshot → model → merge-or-insert.
//
// The model sees previous goals as {id, order, title, completed} —
// brief, user_id, and note_id are internal and stripped. Each returned
// suggestion either merges into an existing goal (id present, identity
// preserved) or creates a new one (id absent). The first dispatch
// failure aborts the whole step; the caller marks the section failed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sp_goal::{Goal, GoalDraft, GoalService};

use crate::client::{GenerateRequest, ModelClient, UploadedDocument};
use crate::error::GenError;
use crate::parse::parse_model_output;
use crate::prompts;

/// The goal fields the model is shown.
#[derive(Debug, Serialize)]
pub struct PreviousGoal<'a> {
    pub id: Uuid,
    pub order: u32,
    pub title: &'a str,
    pub completed: bool,
}

/// Serialize the model-facing snapshot of a user's goals.
pub fn previous_goals_snapshot(goals: &[Goal]) -> Result<String, GenError> {
    let view: Vec<PreviousGoal<'_>> = goals
        .iter()
        .map(|g| PreviousGoal {
            id: g.id,
            order: g.order,
            title: &g.title,
            completed: g.completed,
        })
        .collect();
    Ok(serde_json::to_string(&view)?)
}

/// One model suggestion: a merge when `id` is present, otherwise new.
///
/// The model also returns a `completed` flag, but the reconciler governs
/// completion (inheritance for merges, false for new goals), so it is
/// accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalSuggestion {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub order: u32,
    pub title: String,
    #[serde(default)]
    pub brief: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Dispatch parsed suggestions into the goal service. Returns how many
/// were applied.
pub fn apply_suggestions(
    goals: &GoalService,
    user_id: Uuid,
    note_id: Uuid,
    suggestions: &[GoalSuggestion],
) -> Result<usize, GenError> {
    for suggestion in suggestions {
        let brief = suggestion
            .brief
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                GenError::BadModelOutput(format!(
                    "suggestion {:?} is missing a brief",
                    suggestion.title
                ))
            })?;
        let draft = GoalDraft {
            order: suggestion.order,
            title: suggestion.title.clone(),
            brief: brief.to_string(),
        };

        match suggestion.id {
            Some(goal_id) => {
                goals.merge_goal(user_id, goal_id, &draft, Some(note_id))?;
            }
            None => {
                goals.create_goal(user_id, &draft, Some(note_id))?;
            }
        }
    }
    Ok(suggestions.len())
}

/// The full roadmap generation step for one upload.
pub async fn generate_goals(
    model: &dyn ModelClient,
    goals: &GoalService,
    user_id: Uuid,
    note_id: Uuid,
    document: UploadedDocument,
) -> Result<usize, GenError> {
    let previous = goals.list_goals(user_id)?;
    let snapshot = previous_goals_snapshot(&previous)?;
    let prompt = prompts::roadmap(&snapshot);

    let output = model
        .generate(GenerateRequest::with_document(prompt, document))
        .await?;
    let suggestions: Vec<GoalSuggestion> = parse_model_output(&output)?;

    let applied = apply_suggestions(goals, user_id, note_id, &suggestions)?;
    tracing::info!(user_id = %user_id, note_id = %note_id, applied, "roadmap goals generated");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use sp_goal::JsonGoalStore;
    use tempfile::tempdir;

    struct CannedClient {
        output: String,
    }

    #[async_trait]
    impl ModelClient for CannedClient {
        async fn generate(&self, _request: GenerateRequest) -> Result<String, GenError> {
            Ok(self.output.clone())
        }
    }

    fn service(dir: &std::path::Path) -> GoalService {
        GoalService::new(Arc::new(JsonGoalStore::new(dir.join("goals")).unwrap()))
    }

    fn document() -> UploadedDocument {
        UploadedDocument {
            filename: "week1.pdf".into(),
            mime_type: "application/pdf".into(),
            bytes: b"notes".to_vec(),
        }
    }

    #[test]
    fn snapshot_strips_internal_fields() {
        let goal = Goal::new(Uuid::new_v4(), 1, "T", "secret brief", false, Some(Uuid::new_v4()));
        let snapshot = previous_goals_snapshot(std::slice::from_ref(&goal)).unwrap();
        assert!(snapshot.contains("\"title\":\"T\""));
        assert!(!snapshot.contains("brief"));
        assert!(!snapshot.contains("user_id"));
        assert!(!snapshot.contains("note_id"));
    }

    #[tokio::test]
    async fn new_suggestions_create_goals() {
        let dir = tempdir().unwrap();
        let svc = service(dir.path());
        let user = Uuid::new_v4();
        let note = Uuid::new_v4();

        let client = CannedClient {
            output: r#"```json
[{"order": 1, "title": "Understand arrays", "brief": "Array layout in memory.", "completed": false},
 {"order": 2, "title": "Pointer arithmetic", "brief": "Walk arrays with pointers.", "completed": false}]
```"#
                .to_string(),
        };

        let applied = generate_goals(&client, &svc, user, note, document()).await.unwrap();
        assert_eq!(applied, 2);

        let goals = svc.list_goals(user).unwrap();
        assert_eq!(goals.len(), 2);
        assert!(goals.iter().all(|g| g.note_id == Some(note)));
        assert!(goals.iter().all(|g| !g.completed));
    }

    #[tokio::test]
    async fn id_bearing_suggestion_merges_in_place() {
        let dir = tempdir().unwrap();
        let svc = service(dir.path());
        let user = Uuid::new_v4();
        let note = Uuid::new_v4();

        let existing = svc
            .create_goal(
                user,
                &GoalDraft {
                    order: 1,
                    title: "Understand pointers".into(),
                    brief: "old brief".into(),
                },
                None,
            )
            .unwrap();
        svc.set_completion(user, 1, true).unwrap();

        let client = CannedClient {
            output: format!(
                r#"[{{"order": 1, "id": "{}", "title": "Pointers and arrays", "brief": "Relate pointers to arrays.", "completed": false}}]"#,
                existing.id
            ),
        };

        generate_goals(&client, &svc, user, note, document()).await.unwrap();

        let goals = svc.list_goals(user).unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].id, existing.id);
        assert_eq!(goals[0].title, "Pointers and arrays");
        // Merged into its own completed slot: flag inherited.
        assert!(goals[0].completed);
        assert_eq!(goals[0].note_id, Some(note));
    }

    #[tokio::test]
    async fn unparseable_output_is_terminal() {
        let dir = tempdir().unwrap();
        let svc = service(dir.path());
        let user = Uuid::new_v4();

        let client = CannedClient {
            output: "I could not find any goals in this file.".into(),
        };

        let result = generate_goals(&client, &svc, user, Uuid::new_v4(), document()).await;
        assert!(matches!(result, Err(GenError::BadModelOutput(_))));
        assert!(svc.list_goals(user).unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_brief_is_bad_output() {
        let dir = tempdir().unwrap();
        let svc = service(dir.path());
        let user = Uuid::new_v4();

        let client = CannedClient {
            output: r#"[{"order": 1, "title": "No brief", "completed": false}]"#.into(),
        };

        let result = generate_goals(&client, &svc, user, Uuid::new_v4(), document()).await;
        assert!(matches!(result, Err(GenError::BadModelOutput(_))));
    }
}
