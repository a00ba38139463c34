//! LyricsNMusic adapter
//!
//! Song pages live at `/{artist-slug}/{title-slug}` and carry the lyrics in a
//! `<pre itemprop="description">` element.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::client::PageClient;
use super::domain::{SourceError, SourceKind};
use super::html;
use super::traits::LyricsSource;

const BASE_URL: &str = "https://www.lyricsnmusic.com";

static LYRICS_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<pre itemprop=['"]description['"][^>]*>(.*?)</pre>"#).unwrap()
});

/// LyricsNMusic client
pub struct LyricsNMusic {
    client: PageClient,
    base_url: String,
}

impl LyricsNMusic {
    pub fn new(client: PageClient) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn page_url(&self, artist: &str, title: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            html::slug(artist, '-', true),
            html::slug(title, '-', true)
        )
    }
}

fn extract(page: &str) -> Option<String> {
    html::capture_text(page, &LYRICS_BLOCK)
}

#[async_trait]
impl LyricsSource for LyricsNMusic {
    fn kind(&self) -> SourceKind {
        SourceKind::LyricsNMusic
    }

    async fn fetch(&self, artist: &str, title: &str) -> Result<Option<String>, SourceError> {
        let url = self.page_url(artist, title);
        self.client.fetch_with(self.kind(), &url, extract).await
    }
}
