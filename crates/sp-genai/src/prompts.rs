// prompts.rs — Prompt assembly for each artifact family.
//
// The wording here is deliberately plain: prompt tuning is out of scope,
// the contract that matters is the JSON shape each prompt demands, which
// the parsers in this crate expect exactly.

/// Roadmap goal integration prompt. `previous_goals` is the serialized
/// `{id, order, title, completed}` snapshot.
pub fn roadmap(previous_goals: &str) -> String {
    format!(
        r#"Previous goals: {previous_goals}
You are given previous_goals (array of {{"id", "order", "title", "completed"}}) and an attached study file.

Generate 1-5 new roadmap goals from the file and integrate them with previous_goals.
- If a goal merges with an existing one: keep its "id", give it an updated "title" (max 4 words) and a "brief" (max 14 words). "completed" must follow logical progression (never true after false).
- If a goal is new: no "id", include "brief", set "completed" to false.
- Do not include previous goals that are unchanged.

Return only a JSON array:
[{{"order": number, "id"?: string, "title": string, "brief": string, "completed": boolean}}]
"order" reflects where the goal belongs in the roadmap, starting at 1."#
    )
}

/// Quiz integration prompt.
pub fn quizzes(previous_quizzes: &str) -> String {
    format!(
        r#"Previous quizzes: {previous_quizzes}
You are given previous_quizzes and an attached study file.

Generate multiple-choice quizzes from the file. If a quiz updates an existing one, keep its "id"; otherwise omit "id".

Return only a JSON array:
[{{"id"?: string, "question": string, "options": [string], "correct": number}}]
"correct" is the zero-based index of the right option."#
    )
}

/// Matching-pair puzzle integration prompt.
pub fn pairs(previous_puzzles: &str) -> String {
    format!(
        r#"Previous puzzles: {previous_puzzles}
You are given previous_puzzles and an attached study file.

Generate matching-pair puzzles from the file: each puzzle is a set of term/definition pairs. If a puzzle updates an existing one, keep its "id"; otherwise omit "id".

Return only a JSON array:
[{{"id"?: string, "pairs": [{{"left": string, "right": string}}]}}]"#
    )
}

/// Crossword generation prompt (shape contract only; the grid layout is
/// entirely the model's problem).
pub fn crossword() -> String {
    r#"Based on the attached file, generate a crossword puzzle as JSON.

Extract 8-12 key terms, build a 15x15 grid (null for empty cells, letter strings for filled cells, number strings on word-start cells), and make the words intersect.

Return only a JSON object:
{"metadata": {"title": string, "difficulty": "easy"|"medium"|"hard", "gridSize": {"rows": number, "cols": number}, "totalWords": number},
 "grid": [[null | string]],
 "words": [{"number": number, "word": string, "direction": "across"|"down", "startRow": number, "startCol": number, "length": number, "hint": string}],
 "hints": {"across": [{"number": number, "hint": string}], "down": [{"number": number, "hint": string}]}}"#
        .to_string()
}

/// Flashcard-from-topic prompt.
pub fn flashcards(topic: &str, count: u32) -> String {
    format!(
        r#"Give {count} flashcards for the topic "{topic}" as a JSON array. Each element must be an object with the keys "front" and "back". Put the question on "front" and a brief answer on "back". Return only the JSON array."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roadmap_prompt_embeds_snapshot() {
        let prompt = roadmap(r#"[{"id":"x","order":1,"title":"T","completed":false}]"#);
        assert!(prompt.contains(r#""title":"T""#));
        assert!(prompt.contains("JSON array"));
    }

    #[test]
    fn flashcards_prompt_embeds_topic_and_count() {
        let prompt = flashcards("osmosis", 3);
        assert!(prompt.contains("osmosis"));
        assert!(prompt.contains("Give 3 flashcards"));
    }
}
