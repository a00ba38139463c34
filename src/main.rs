//! lyrico - download song lyrics for a music library.
//!
//! Scans a directory for audio files, reads artist and title from their
//! tags, looks the songs up on a chain of lyrics websites and saves the
//! lyrics to a text file and/or the audio file's tag. Songs that already
//! have lyrics are skipped, so a run can be repeated safely.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod metadata;
pub mod model;
pub mod normalize;
pub mod persist;
pub mod report;
pub mod scanner;
pub mod sources;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging; RUST_LOG overrides the default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lyrico=warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}
