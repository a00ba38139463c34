//! The lyrics source capability.
//!
//! Every site adapter implements [`LyricsSource`]; the resolution engine only
//! ever talks to this trait, so tests substitute the mocks below for real
//! HTTP clients.

use async_trait::async_trait;

use super::domain::{SourceError, SourceKind};

/// A lyrics website lookup.
#[async_trait]
pub trait LyricsSource: Send + Sync {
    /// Which site this is.
    fn kind(&self) -> SourceKind;

    /// Look up lyrics for a song.
    ///
    /// Returns `Ok(None)` when the site has no lyrics for the song.
    async fn fetch(&self, artist: &str, title: &str) -> Result<Option<String>, SourceError>;
}
