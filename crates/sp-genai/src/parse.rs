// parse.rs — Model output parsing.
//
// Models wrap JSON in Markdown code fences more often than not; strip
// them, then parse strictly. Anything that doesn't deserialize into the
// expected shape is a BadModelOutput.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::GenError;

static OPEN_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[a-zA-Z]*\s*\n?").unwrap());
static CLOSE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n?```\s*$").unwrap());

/// Remove a surrounding Markdown code fence, if present.
pub fn strip_code_fences(text: &str) -> String {
    let text = text.trim();
    let text = OPEN_FENCE.replace(text, "");
    let text = CLOSE_FENCE.replace(&text, "");
    text.trim().to_string()
}

/// Parse model output into the expected JSON shape.
pub fn parse_model_output<T: DeserializeOwned>(text: &str) -> Result<T, GenError> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(&cleaned).map_err(|e| {
        let preview: String = cleaned.chars().take(200).collect();
        GenError::BadModelOutput(format!("{e}; output starts: {preview:?}"))
    })
}
