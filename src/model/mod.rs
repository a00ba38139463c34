//! Core data models for a lyrics run.
//!
//! Defines [`Track`], the per-file record that is built once at run start,
//! mutated in place by resolution and persistence, and dropped after its log
//! line is rendered, plus [`AudioFormat`], which selects the tag field used
//! for embedded lyrics.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::sources::SourceKind;

/// Audio container kinds that lyrico knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3,
    M4a,
    Mp4,
    Flac,
    Ogg,
    Oga,
    /// Recognized when scanning, but lofty cannot read ASF files, so every
    /// `.wma` file is reported as ignored with a tag read error.
    Wma,
}

impl AudioFormat {
    /// Determine the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "m4a" => Some(Self::M4a),
            "mp4" => Some(Self::Mp4),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            "oga" => Some(Self::Oga),
            "wma" => Some(Self::Wma),
            _ => None,
        }
    }

    /// Determine the format of a file from its path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Lowercase extension used for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::M4a => "m4a",
            Self::Mp4 => "mp4",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Oga => "oga",
            Self::Wma => "wma",
        }
    }

    /// Metadata field that holds unsynchronized lyrics in this container.
    ///
    /// ID3v2 uses the `USLT` frame, MP4 the `©lyr` atom, Vorbis comments
    /// (FLAC and Ogg) have no standard field so the common `LYRICS` comment
    /// is used, and ASF carries `WM/Lyrics`.
    ///
    /// Informational only: the field actually written is picked by lofty's
    /// mapping of `ItemKey::Lyrics` for the file's primary tag type, which
    /// matches this table for every format lofty can write.
    pub fn lyrics_key(self) -> &'static str {
        match self {
            Self::Mp3 => "USLT",
            Self::M4a | Self::Mp4 => "\u{a9}lyr",
            Self::Flac | Self::Ogg | Self::Oga => "LYRICS",
            Self::Wma => "WM/Lyrics",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One audio file discovered during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Location of the audio file
    pub path: PathBuf,
    /// Artist from tags, whitespace-normalized
    pub artist: Option<String>,
    /// Title from tags; shortened in place by the normalization pass
    pub title: Option<String>,
    /// Album from tags
    pub album: Option<String>,
    /// Container kind, selects the lyrics tag field
    pub format: Option<AudioFormat>,
    /// Target of the file sink
    pub lyrics_path: Option<PathBuf>,
    /// The sidecar file already existed before this run
    pub file_present: bool,
    /// The lyrics tag already held text before this run
    pub tag_present: bool,
    /// Lyrics text once a source succeeds
    pub lyrics: Option<String>,
    pub saved_to_file: bool,
    pub saved_to_tag: bool,
    /// Source that produced `lyrics`
    pub source: Option<SourceKind>,
    /// Most recent failure for this track
    pub error: Option<String>,
}

impl Track {
    /// Create an empty track for a path; metadata is filled in by
    /// [`metadata::extract`](crate::metadata::extract).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            format: AudioFormat::from_path(&path),
            path,
            artist: None,
            title: None,
            album: None,
            lyrics_path: None,
            file_present: false,
            tag_present: false,
            lyrics: None,
            saved_to_file: false,
            saved_to_tag: false,
            source: None,
            error: None,
        }
    }

    /// Artist and title, if both are present.
    pub fn query(&self) -> Option<(&str, &str)> {
        match (self.artist.as_deref(), self.title.as_deref()) {
            (Some(artist), Some(title)) => Some((artist, title)),
            _ => None,
        }
    }

    /// Whether this track carries enough metadata to look up lyrics.
    pub fn has_valid_metadata(&self) -> bool {
        self.query().is_some()
    }

    /// Whether lyrics were resolved and are not blank.
    pub fn has_lyrics(&self) -> bool {
        self.lyrics.as_deref().is_some_and(|l| !l.trim().is_empty())
    }

    /// "artist - title" when metadata is complete, the file path otherwise.
    pub fn display_name(&self) -> String {
        match self.query() {
            Some((artist, title)) => format!("{} - {}", artist, title),
            None => self.path.display().to_string(),
        }
    }

    /// Record a failure, replacing any earlier one.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}
