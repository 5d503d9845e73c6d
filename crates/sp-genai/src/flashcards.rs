// flashcards.rs — Flashcard generation from a user-supplied topic.
//
// Unlike the upload-driven families, this is synchronous and
// document-free: the user names a topic, the model returns front/back
// pairs, and the HTTP layer stores them.

use serde::Deserialize;

use sp_study::FlashcardDraft;

use crate::client::{GenerateRequest, ModelClient};
use crate::error::GenError;
use crate::parse::parse_model_output;
use crate::prompts;

/// Hard cap on cards per request, mirroring the dashboard's limit.
pub const MAX_CARDS_PER_REQUEST: u32 = 30;

#[derive(Debug, Deserialize)]
struct CardSuggestion {
    front: String,
    back: String,
}

/// Generate `count` flashcards for a topic. The returned drafts still go
/// through store validation on insert.
pub async fn generate_flashcards(
    model: &dyn ModelClient,
    topic: &str,
    count: u32,
    section: Option<&str>,
) -> Result<Vec<FlashcardDraft>, GenError> {
    let output = model
        .generate(GenerateRequest::text_only(prompts::flashcards(topic, count)))
        .await?;
    let suggestions: Vec<CardSuggestion> = parse_model_output(&output)?;

    if suggestions.is_empty() {
        return Err(GenError::BadModelOutput("model returned no cards".into()));
    }
    if suggestions
        .iter()
        .any(|c| c.front.trim().is_empty() || c.back.trim().is_empty())
    {
        return Err(GenError::BadModelOutput(
            "model returned a card with empty fields".into(),
        ));
    }

    Ok(suggestions
        .into_iter()
        .map(|c| FlashcardDraft {
            front: c.front,
            back: c.back,
            section: section.map(str::to_string),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    struct CannedClient {
        output: String,
    }

    #[async_trait]
    impl ModelClient for CannedClient {
        async fn generate(&self, _request: GenerateRequest) -> Result<String, GenError> {
            Ok(self.output.clone())
        }
    }

    #[tokio::test]
    async fn cards_parse_and_carry_section() {
        let client = CannedClient {
            output: r#"```json
[{"front": "What is osmosis?", "back": "Water diffusion across a membrane."}]
```"#
                .to_string(),
        };

        let drafts = generate_flashcards(&client, "osmosis", 1, Some("bio"))
            .await
            .unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].section.as_deref(), Some("bio"));
    }

    #[tokio::test]
    async fn empty_card_fields_rejected() {
        let client = CannedClient {
            output: r#"[{"front": "", "back": "A"}]"#.to_string(),
        };

        let result = generate_flashcards(&client, "x", 1, None).await;
        assert!(matches!(result, Err(GenError::BadModelOutput(_))));
    }
}
