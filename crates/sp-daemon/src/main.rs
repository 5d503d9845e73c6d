//! # sp-daemon
//!
//! Studypath HTTP daemon.
//!
//! Serves the roadmap, flashcard, quiz, puzzle, session, and upload
//! endpoints, and fires the background generation jobs that turn an
//! uploaded file into study artifacts. Identity comes from an
//! upstream-authenticated `x-user-id` header; credentials never reach
//! this process.
//!
//! ## Usage
//!
//! ```text
//! GENAI_API_KEY=... sp-daemon --data-dir ./data --bind 127.0.0.1:8000
//! ```

mod config;
mod error;
mod extract;
mod routes;
mod state;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{DaemonConfig, FileConfig};
use crate::state::AppState;

/// Studypath HTTP daemon.
#[derive(Parser)]
#[command(name = "sp-daemon", version, about = "Studypath content API daemon")]
struct Cli {
    /// Directory holding all record stores.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Optional TOML config file (defaults to studypath.toml if present).
    #[arg(long, default_value = "studypath.toml")]
    config: PathBuf,

    /// Address to bind (overrides the config file).
    #[arg(long)]
    bind: Option<String>,

    /// Generative model name (overrides the config file).
    #[arg(long)]
    model: Option<String>,

    /// Generative API base URL (overrides the config file).
    #[arg(long)]
    base_url: Option<String>,

    /// Generative API key.
    #[arg(long, env = "GENAI_API_KEY", hide_env_values = true)]
    api_key: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sp_daemon=info".parse()?)
                .add_directive("sp_goal=info".parse()?)
                .add_directive("sp_genai=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file = FileConfig::load(&cli.config)?;
    let config = DaemonConfig::resolve(
        &cli.data_dir,
        &file,
        cli.bind,
        cli.model,
        cli.base_url,
        cli.api_key,
    )?;

    tracing::info!("Starting Studypath daemon");
    tracing::info!("Data dir: {}", cli.data_dir.display());
    tracing::info!("Model: {} at {}", config.model, config.base_url);

    let state = AppState::from_config(&config)?;
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
