// jsonl.rs — shared helpers for per-user JSONL record files.
//
// Each store in this crate keeps one file per user:
// `<store_dir>/<user_id>.jsonl`, one JSON-serialized record per line.
// Append-optimized; updates and removals rewrite the file. Fine for the
// volumes involved (every domain here has a small per-user ceiling).

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::StudyError;

pub(crate) fn user_file(store_dir: &Path, user_id: Uuid) -> PathBuf {
    store_dir.join(format!("{}.jsonl", user_id))
}

pub(crate) fn create_dir(store_dir: impl AsRef<Path>) -> Result<PathBuf, StudyError> {
    let store_dir = store_dir.as_ref().to_path_buf();
    fs::create_dir_all(&store_dir).map_err(|source| StudyError::IoError {
        path: store_dir.display().to_string(),
        source,
    })?;
    Ok(store_dir)
}

/// Read all records from a user file, oldest first. A missing file is an
/// empty list.
pub(crate) fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StudyError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|source| StudyError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|source| StudyError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }

    Ok(records)
}

/// Append one record to a user file.
pub(crate) fn append_record<T: Serialize>(path: &Path, record: &T) -> Result<(), StudyError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| StudyError::IoError {
            path: path.display().to_string(),
            source,
        })?;

    let mut writer = BufWriter::new(file);
    let json = serde_json::to_string(record)?;
    writeln!(writer, "{}", json).map_err(|source| StudyError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    writer.flush().map_err(|source| StudyError::IoError {
        path: path.display().to_string(),
        source,
    })?;

    Ok(())
}

/// Rewrite a user file with the given records.
pub(crate) fn rewrite_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StudyError> {
    let file = File::create(path).map_err(|source| StudyError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(writer, "{}", json).map_err(|source| StudyError::IoError {
            path: path.display().to_string(),
            source,
        })?;
    }

    writer.flush().map_err(|source| StudyError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}
