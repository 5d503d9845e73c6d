// crossword.rs — Crossword puzzle shapes.
//
// Grid generation is delegated entirely to the external model; this
// module only defines the JSON shape the model must return and a
// dimension check. No intersection or word-placement validation happens
// locally.

use serde::{Deserialize, Serialize};

use crate::error::StudyError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordMetadata {
    pub title: String,
    pub difficulty: String,
    pub grid_size: GridSize,
    pub total_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPlacement {
    pub number: u32,
    pub word: String,
    /// "across" or "down".
    pub direction: String,
    pub start_row: usize,
    pub start_col: usize,
    pub length: usize,
    pub hint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hint {
    pub number: u32,
    pub hint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hints {
    pub across: Vec<Hint>,
    pub down: Vec<Hint>,
}

/// A model-generated crossword puzzle.
///
/// Cells are `None` for empty, or a string holding a letter (or a
/// number marker on word-start cells).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crossword {
    pub metadata: CrosswordMetadata,
    pub grid: Vec<Vec<Option<String>>>,
    pub words: Vec<WordPlacement>,
    pub hints: Hints,
}

impl Crossword {
    /// Shape check: the grid must match the advertised dimensions and
    /// carry at least one word. Nothing deeper is verified.
    pub fn shape_check(&self) -> Result<(), StudyError> {
        let GridSize { rows, cols } = self.metadata.grid_size;
        if self.grid.len() != rows {
            return Err(StudyError::Validation(format!(
                "grid has {} rows, metadata says {}",
                self.grid.len(),
                rows
            )));
        }
        if let Some(bad) = self.grid.iter().find(|row| row.len() != cols) {
            return Err(StudyError::Validation(format!(
                "grid row has {} cells, metadata says {}",
                bad.len(),
                cols
            )));
        }
        if self.words.is_empty() {
            return Err(StudyError::Validation("crossword has no words".into()));
        }
        Ok(())
    }
}
