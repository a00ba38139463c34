//! Types shared by every lyrics source.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The lyrics websites lyrico knows about.
///
/// The declaration order is the default priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    #[serde(rename = "lyric_wikia")]
    LyricWikia,
    #[serde(rename = "lyrics_n_music")]
    LyricsNMusic,
    #[serde(rename = "musix_match")]
    MusixMatch,
    #[serde(rename = "lyricsmode")]
    LyricsMode,
    #[serde(rename = "az_lyrics")]
    AzLyrics,
}

impl SourceKind {
    /// All sources in default priority order.
    pub const ALL: [SourceKind; 5] = [
        SourceKind::LyricWikia,
        SourceKind::LyricsNMusic,
        SourceKind::MusixMatch,
        SourceKind::LyricsMode,
        SourceKind::AzLyrics,
    ];

    /// Key used for this source in the config file.
    pub fn key(self) -> &'static str {
        match self {
            Self::LyricWikia => "lyric_wikia",
            Self::LyricsNMusic => "lyrics_n_music",
            Self::MusixMatch => "musix_match",
            Self::LyricsMode => "lyricsmode",
            Self::AzLyrics => "az_lyrics",
        }
    }

    /// Human-readable site name, shown in the run log.
    pub fn name(self) -> &'static str {
        match self {
            Self::LyricWikia => "LyricWikia",
            Self::LyricsNMusic => "LyricsNMusic",
            Self::MusixMatch => "MusixMatch",
            Self::LyricsMode => "LyricsMode",
            Self::AzLyrics => "AZLyrics",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur while asking a site for lyrics.
///
/// None of these abort a run; the engine records the message on the track
/// and moves on to the next source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("Lyrics not found on {0}")]
    NotFound(SourceKind),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {source_kind}")]
    Http { source_kind: SourceKind, status: u16 },

    #[error("Rate limited by {0} - try again later")]
    RateLimited(SourceKind),

    #[error("Failed to read response: {0}")]
    Parse(String),
}
