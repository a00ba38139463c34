//! Persistence of resolved lyrics.
//!
//! Two independent sinks: a sidecar text file ([`file`]) and the audio
//! file's own tag ([`tag`]). A failure in one does not stop the other; the
//! track's error only keeps the most recent failure.

mod file;
mod tag;

pub use file::{FileSinkError, render_sidecar, write_sidecar};
pub use tag::{LoftyTagWriter, TagSinkError, TagWriter};

use crate::config::RunConfig;
use crate::model::Track;
use crate::report::RunAggregate;

/// What happened to one sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    /// Disabled, or there was nothing to write
    Skipped,
    Saved,
    Failed(String),
}

/// Result of persisting one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistOutcome {
    pub lyrics_found: bool,
    pub file: SinkOutcome,
    pub tag: SinkOutcome,
}

impl PersistOutcome {
    fn nothing_to_write() -> Self {
        Self {
            lyrics_found: false,
            file: SinkOutcome::Skipped,
            tag: SinkOutcome::Skipped,
        }
    }
}

/// Write the track's lyrics to every enabled sink.
///
/// Tracks without lyrics are left untouched.
pub fn persist(
    track: &mut Track,
    config: &RunConfig,
    tags: &dyn TagWriter,
    aggregate: &mut RunAggregate,
) -> PersistOutcome {
    let Some(lyrics) = track.lyrics.clone().filter(|l| !l.trim().is_empty()) else {
        return PersistOutcome::nothing_to_write();
    };

    let file = if config.save_to_file {
        match save_file(track, &lyrics) {
            Ok(()) => {
                track.saved_to_file = true;
                aggregate.record_file_saved();
                SinkOutcome::Saved
            }
            Err(e) => {
                tracing::warn!(track = %track.display_name(), error = %e, "Could not save lyrics file");
                track.set_error(e.to_string());
                SinkOutcome::Failed(e.to_string())
            }
        }
    } else {
        SinkOutcome::Skipped
    };

    let tag = if config.save_to_tag {
        match tags.write_lyrics(track, &lyrics) {
            Ok(()) => {
                track.saved_to_tag = true;
                aggregate.record_tag_saved();
                SinkOutcome::Saved
            }
            Err(e) => {
                tracing::warn!(track = %track.display_name(), error = %e, "Could not save lyrics tag");
                track.set_error(e.to_string());
                SinkOutcome::Failed(e.to_string())
            }
        }
    } else {
        SinkOutcome::Skipped
    };

    PersistOutcome {
        lyrics_found: true,
        file,
        tag,
    }
}

fn save_file(track: &Track, lyrics: &str) -> Result<(), FileSinkError> {
    let (Some(path), Some((artist, title))) = (track.lyrics_path.as_deref(), track.query()) else {
        return Err(FileSinkError::NoTarget);
    };
    let contents = render_sidecar(artist, title, track.album.as_deref(), lyrics);
    write_sidecar(path, &contents)
}
