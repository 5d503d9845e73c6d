// config.rs — Daemon configuration.
//
// DaemonConfig determines where the daemon stores its state (one
// subdirectory per record family under the data dir) and how it reaches
// the generative model. Defaults can be overridden by an optional
// `studypath.toml` next to the data dir, and flags override the file.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Resolved configuration for the daemon.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Directory for goal records.
    pub goals_dir: PathBuf,

    /// Directory for flashcard files.
    pub flashcards_dir: PathBuf,

    /// Directory for quiz files.
    pub quizzes_dir: PathBuf,

    /// Directory for pair-puzzle files.
    pub pairs_dir: PathBuf,

    /// Directory for session files.
    pub sessions_dir: PathBuf,

    /// Directory for the upload ledger.
    pub notes_dir: PathBuf,

    /// Address the HTTP server binds to.
    pub bind: SocketAddr,

    /// Generative model endpoint and name.
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

/// The subset of settings `studypath.toml` may carry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub bind: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl FileConfig {
    /// Load a config file if it exists; a missing file is an empty config.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

impl DaemonConfig {
    /// Resolve the final config: flag > file > default.
    pub fn resolve(
        data_dir: impl AsRef<Path>,
        file: &FileConfig,
        bind_flag: Option<String>,
        model_flag: Option<String>,
        base_url_flag: Option<String>,
        api_key: String,
    ) -> anyhow::Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let bind = bind_flag
            .or_else(|| file.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind:?}"))?;

        Ok(Self {
            goals_dir: data_dir.join("goals"),
            flashcards_dir: data_dir.join("flashcards"),
            quizzes_dir: data_dir.join("quizzes"),
            pairs_dir: data_dir.join("pairs"),
            sessions_dir: data_dir.join("sessions"),
            notes_dir: data_dir.join("notes"),
            bind,
            base_url: base_url_flag
                .or_else(|| file.base_url.clone())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model_flag
                .or_else(|| file.model.clone())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
        })
    }
}
