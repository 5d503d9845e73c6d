// crossword.rs — Crossword generation: a shape-checked pass-through.
//
// The grid layout is delegated entirely to the model; locally we only
// verify that the returned JSON deserializes and that the grid matches
// its advertised dimensions.

use sp_study::Crossword;

use crate::client::{GenerateRequest, ModelClient, UploadedDocument};
use crate::error::GenError;
use crate::parse::parse_model_output;
use crate::prompts;

/// Generate a crossword puzzle from an uploaded document.
pub async fn generate_crossword(
    model: &dyn ModelClient,
    document: UploadedDocument,
) -> Result<Crossword, GenError> {
    let output = model
        .generate(GenerateRequest::with_document(
            prompts::crossword(),
            document,
        ))
        .await?;

    let crossword: Crossword = parse_model_output(&output)?;
    crossword
        .shape_check()
        .map_err(|e| GenError::BadModelOutput(e.to_string()))?;
    Ok(crossword)
}
