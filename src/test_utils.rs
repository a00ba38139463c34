//! Test utilities and fixtures for lyrico tests.
//!
//! Track builders, run configurations and a recording [`TagWriter`] so
//! engine and persistence tests don't need real audio files.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{MockTagWriter, track_in};
//!
//! let temp = tempfile::tempdir().unwrap();
//! let mut t = track_in(temp.path(), "Artist", "Title");
//! t.lyrics = Some("la la".to_string());
//! let tags = MockTagWriter::new();
//! ```

use lofty::config::WriteOptions;
use lofty::tag::{Accessor, Tag, TagExt, TagType};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::RunConfig;
use crate::model::Track;
use crate::persist::{TagSinkError, TagWriter};
use crate::sources::traits::mocks::{MockSource, SharedMock};
use crate::sources::{LyricsSource, SourceChain};

/// Creates a track with artist and title set.
///
/// The audio path is made up and the sidecar path points into `/lyrics`,
/// so nothing may be written for it. Use [`track_in`] for that.
pub fn track(artist: &str, title: &str) -> Track {
    let mut track = Track::new(format!("/music/{} - {}.mp3", artist, title));
    track.artist = Some(artist.to_string());
    track.title = Some(title.to_string());
    track.lyrics_path = Some(PathBuf::from(format!("/lyrics/{} - {}.txt", artist, title)));
    track
}

/// Like [`track`], with the sidecar file placed in `dir`.
pub fn track_in(dir: &Path, artist: &str, title: &str) -> Track {
    let mut track = track(artist, title);
    track.lyrics_path = Some(dir.join(format!("{} - {}.txt", artist, title)));
    track
}

/// Writes a tiny but valid MP3 (20 silent MPEG-1 Layer III frames) with an
/// ID3v2 tag holding `artist` and `title`, and returns its path.
pub fn tagged_mp3(dir: &Path, artist: &str, title: &str) -> PathBuf {
    let path = dir.join(format!("{} - {}.mp3", artist, title));

    // 128 kbps, 44.1 kHz, no padding: 417 bytes per frame
    let mut frame = vec![0xFF, 0xFB, 0x90, 0x00];
    frame.resize(417, 0);
    std::fs::write(&path, frame.repeat(20)).unwrap();

    let mut tag = Tag::new(TagType::Id3v2);
    tag.set_artist(artist.to_string());
    tag.set_title(title.to_string());
    tag.save_to_path(&path, WriteOptions::default()).unwrap();
    path
}

/// Run configuration with both sinks enabled.
pub fn file_and_tag_config() -> RunConfig {
    RunConfig {
        save_to_file: true,
        save_to_tag: true,
        ..RunConfig::default()
    }
}

/// Builds a chain from shared mocks, keeping them inspectable.
pub fn chain_of(mocks: &[Arc<MockSource>]) -> SourceChain {
    let sources: Vec<Box<dyn LyricsSource>> = mocks
        .iter()
        .map(|m| Box::new(SharedMock(Arc::clone(m))) as Box<dyn LyricsSource>)
        .collect();
    SourceChain::new(sources)
}

/// Tag writer that records every write instead of touching files.
pub struct MockTagWriter {
    failure: Option<TagSinkError>,
    writes: Mutex<Vec<(PathBuf, String)>>,
}

impl MockTagWriter {
    pub fn new() -> Self {
        Self {
            failure: None,
            writes: Mutex::new(Vec::new()),
        }
    }

    /// A writer whose every write fails with `error`.
    pub fn failing(error: TagSinkError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    /// Successful writes, in order.
    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes.lock().unwrap().clone()
    }
}

impl TagWriter for MockTagWriter {
    fn write_lyrics(&self, track: &Track, lyrics: &str) -> Result<(), TagSinkError> {
        if let Some(ref err) = self.failure {
            return Err(err.clone());
        }
        self.writes
            .lock()
            .unwrap()
            .push((track.path.clone(), lyrics.to_string()));
        Ok(())
    }
}
