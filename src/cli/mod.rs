//! Command-line interface for lyrico.
//!
//! One command: scan a directory and download lyrics for every song in it.

mod commands;

pub use commands::{Cli, run_command};
