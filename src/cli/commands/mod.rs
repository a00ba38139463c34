//! CLI definition and dispatch.
//!
//! Configuration is loaded (and created on first run) here, frozen into a
//! [`RunConfig`](crate::config::RunConfig) and handed to the download
//! command.

mod download;

use clap::Parser;
use std::path::PathBuf;
use tokio::runtime::Builder;

pub use download::cmd_download;

use crate::config;

/// Download lyrics for a music library
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for audio files
    pub directory: PathBuf,

    /// Always download and overwrite existing lyrics
    #[arg(long)]
    pub overwrite: bool,
}

/// Run the download for the parsed command line.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Builder::new_current_thread().enable_all().build()?;

    let file_config = config::load_or_init();
    let disabled = file_config.sources.disabled_keys();
    if !disabled.is_empty() {
        tracing::info!(disabled = %disabled.join(", "), "Lyrics sources switched off");
    }

    let run_config = file_config.to_run_config(cli.overwrite);
    if let Some(ref dir) = run_config.lyrics_dir
        && run_config.save_to_file
        && !dir.is_dir()
    {
        tracing::warn!(lyrics_dir = %dir.display(), "Configured lyrics_dir does not exist");
    }
    if run_config.sources.is_empty() {
        eprintln!("Warning: every lyrics source is disabled in the configuration.");
    }

    cmd_download(&rt, &cli.directory, &run_config)
}
