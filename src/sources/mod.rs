//! Lyrics sources - the websites lyrico asks for lyrics.
//!
//! # Architecture
//!
//! - **Domain** (`domain.rs`) - [`SourceKind`] names each site, [`SourceError`]
//!   covers everything that can go wrong talking to one
//! - **Trait** (`traits.rs`) - the [`LyricsSource`] capability the engine uses
//! - **Client** (`client.rs`) - one shared HTTP client for all sites
//! - **Adapters** - one module per site: URL building and lyrics extraction
//!
//! The engine never sees a concrete adapter; it walks a [`SourceChain`]
//! built once from configuration.

pub mod domain;
pub mod traits;
mod az_lyrics;
mod client;
mod html;
mod lyric_wikia;
mod lyrics_n_music;
mod lyricsmode;
mod musix_match;

pub use az_lyrics::AzLyrics;
pub use client::PageClient;
pub use domain::{SourceError, SourceKind};
pub use lyric_wikia::LyricWikia;
pub use lyrics_n_music::LyricsNMusic;
pub use lyricsmode::LyricsMode;
pub use musix_match::MusixMatch;
pub use traits::LyricsSource;

use crate::config::RunConfig;

/// Build the adapter for one site.
pub fn build_source(kind: SourceKind, client: PageClient) -> Box<dyn LyricsSource> {
    match kind {
        SourceKind::LyricWikia => Box::new(LyricWikia::new(client)),
        SourceKind::LyricsNMusic => Box::new(LyricsNMusic::new(client)),
        SourceKind::MusixMatch => Box::new(MusixMatch::new(client)),
        SourceKind::LyricsMode => Box::new(LyricsMode::new(client)),
        SourceKind::AzLyrics => Box::new(AzLyrics::new(client)),
    }
}

/// Enabled sources in priority order.
pub struct SourceChain {
    sources: Vec<Box<dyn LyricsSource>>,
}

impl SourceChain {
    pub fn new(sources: Vec<Box<dyn LyricsSource>>) -> Self {
        Self { sources }
    }

    /// Build the chain for the sources enabled in `config`, in its order.
    pub fn from_config(config: &RunConfig) -> Result<Self, SourceError> {
        let client = PageClient::new()?;
        let sources = config
            .sources
            .iter()
            .map(|kind| build_source(*kind, client.clone()))
            .collect();
        Ok(Self::new(sources))
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn LyricsSource> {
        self.sources.iter().map(|s| s.as_ref())
    }

    pub fn kinds(&self) -> Vec<SourceKind> {
        self.iter().map(|s| s.kind()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
