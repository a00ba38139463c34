//! Audio file metadata extraction.
//!
//! Uses the lofty crate for format-independent tag access. For every audio
//! file this produces a [`Track`] holding artist, title and album, the
//! sidecar path lyrics would be written to, and whether the file and tag
//! sinks already hold lyrics.
//!
//! Extraction never fails: anything that goes wrong is recorded in
//! [`Track::error`] and the track is reported as ignored.

use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey};
use std::path::{Path, PathBuf};

use crate::config::RunConfig;
use crate::error::{Error, Result, ResultExt};
use crate::model::Track;

/// Tag fields lyrico cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TagSnapshot {
    artist: Option<String>,
    title: Option<String>,
    album: Option<String>,
    lyrics_present: bool,
}

/// Build a [`Track`] for an audio file.
pub fn extract(path: &Path, config: &RunConfig) -> Track {
    let mut track = Track::new(path);

    if track.format.is_none() {
        track.set_error("Unsupported audio format");
        return track;
    }

    let tags = match read_tags(path) {
        Ok(tags) => tags,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Could not read tags");
            track.set_error(format!("Could not read tags: {}", e));
            return track;
        }
    };

    track.artist = tags.artist;
    track.title = tags.title;
    track.album = tags.album;
    track.tag_present = tags.lyrics_present;

    apply_sidecar(&mut track, config);
    track
}

/// Fill in the sidecar path and whether it already exists.
///
/// Tracks without artist or title get an explanatory error instead.
pub fn apply_sidecar(track: &mut Track, config: &RunConfig) {
    let Some((artist, title)) = track.query() else {
        let missing = match (track.artist.is_some(), track.title.is_some()) {
            (false, false) => "Artist and title",
            (false, true) => "Artist",
            _ => "Title",
        };
        track.set_error(format!("{} not found in tags.", missing));
        return;
    };

    let lyrics_path = sidecar_path(&track.path, artist, title, config.lyrics_dir.as_deref());
    track.file_present = lyrics_path.is_file();
    track.lyrics_path = Some(lyrics_path);
}

fn read_tags(path: &Path) -> Result<TagSnapshot> {
    // Probe the file to determine format and read tags
    let tagged_file = Probe::open(path)
        .with_context("Failed to open file for probing")?
        .read()
        .with_context("Failed to read file metadata")?;

    // Get the primary tag, or fall back to the first available tag
    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
        .ok_or_else(|| Error::metadata(path, "no tags found"))?;

    Ok(TagSnapshot {
        artist: tag.artist().as_deref().and_then(sanitize),
        title: tag.title().as_deref().and_then(sanitize),
        album: tag.album().as_deref().and_then(sanitize),
        lyrics_present: tag
            .get_string(&ItemKey::Lyrics)
            .is_some_and(|l| !l.trim().is_empty()),
    })
}

/// Trim a tag value and collapse runs of whitespace.
///
/// Blank values become `None`.
pub fn sanitize(value: &str) -> Option<String> {
    let words: Vec<&str> = value.split_whitespace().collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Where the lyrics file for a song goes: `{artist} - {title}.txt` in
/// `lyrics_dir`, or next to the audio file when no directory is configured.
pub fn sidecar_path(
    audio_path: &Path,
    artist: &str,
    title: &str,
    lyrics_dir: Option<&Path>,
) -> PathBuf {
    let file_name = format!(
        "{} - {}.txt",
        sanitize_filename(artist),
        sanitize_filename(title)
    );
    let dir = lyrics_dir
        .or_else(|| audio_path.parent())
        .unwrap_or_else(|| Path::new("."));
    dir.join(file_name)
}

/// Replaces characters that are invalid in file names
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Sidecar files always land directly inside the lyrics directory
        #[test]
        fn sidecar_stays_in_lyrics_dir(
            artist in "[a-zA-Z0-9 /:*?\"<>|_-]{1,30}",
            title in "[a-zA-Z0-9 /:*?\"<>|_-]{1,30}",
        ) {
            let dir = Path::new("/lyrics");
            let path = sidecar_path(Path::new("/music/x.mp3"), &artist, &title, Some(dir));
            prop_assert_eq!(path.parent(), Some(dir));
        }

        /// Sanitized values never carry leading, trailing or doubled whitespace
        #[test]
        fn sanitize_is_tidy(value in "[a-z \t\n]{0,30}") {
            if let Some(clean) = sanitize(&value) {
                prop_assert_eq!(clean.trim(), clean.as_str());
                prop_assert!(!clean.contains("  "));
            }
        }
    }
}
