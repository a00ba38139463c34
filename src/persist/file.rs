//! Sidecar lyrics files.

use std::io;
use std::path::Path;

/// Why a lyrics file could not be written
#[derive(Debug, thiserror::Error)]
pub enum FileSinkError {
    #[error("\"lyrics_dir\" does not exist. Please set a \"lyrics_dir\" which exists.")]
    MissingDirectory,

    #[error("Cannot save lyrics to file. The file is opened or in use.")]
    InUse,

    #[error("Cannot save lyrics to file. Unable to create file with song metadata.")]
    InvalidName,

    #[error("Cannot save lyrics to file. No file name could be built for this song.")]
    NoTarget,

    #[error("Cannot save lyrics to file. {0}")]
    Other(#[source] io::Error),
}

impl From<io::Error> for FileSinkError {
    fn from(e: io::Error) -> Self {
        // EINVAL on unix, ERROR_INVALID_NAME on windows
        if matches!(e.raw_os_error(), Some(22) | Some(123)) {
            return FileSinkError::InvalidName;
        }
        match e.kind() {
            io::ErrorKind::NotFound => FileSinkError::MissingDirectory,
            io::ErrorKind::PermissionDenied => FileSinkError::InUse,
            io::ErrorKind::InvalidInput => FileSinkError::InvalidName,
            _ => FileSinkError::Other(e),
        }
    }
}

/// Sidecar file contents: a short header, a blank line, then the lyrics.
pub fn render_sidecar(artist: &str, title: &str, album: Option<&str>, lyrics: &str) -> String {
    format!(
        "Artist - {}\nTitle - {}\nAlbum - {}\n\n{}",
        artist,
        title,
        album.unwrap_or("Unknown"),
        lyrics
    )
}

/// Create or replace the sidecar file at `path`.
pub fn write_sidecar(path: &Path, contents: &str) -> Result<(), FileSinkError> {
    std::fs::write(path, contents)?;
    tracing::debug!(path = %path.display(), "Wrote lyrics file");
    Ok(())
}
