//! Directory scanning for audio files.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::model::AudioFormat;

/// Recursively collect audio files under `root`, sorted by path.
///
/// Files are recognized by extension (case-insensitive). Unreadable
/// entries are skipped.
pub fn collect_audio_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(target: "lyrico::scanner", error = %err, "Skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_audio_file(e.path()))
        .map(|e| e.into_path())
        .collect();

    files.sort();
    tracing::debug!(target: "lyrico::scanner", root = %root.display(), count = files.len(), "Scan finished");
    Ok(files)
}

/// Check if a path has a supported audio file extension
pub fn is_audio_file(path: &Path) -> bool {
    AudioFormat::from_path(path).is_some()
}
