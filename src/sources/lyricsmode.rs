//! LyricsMode adapter

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::client::PageClient;
use super::domain::{SourceError, SourceKind};
use super::html;
use super::traits::LyricsSource;

const BASE_URL: &str = "https://www.lyricsmode.com";

static LYRICS_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<div id=['"]lyrics_text['"][^>]*>(.*?)</div>"#).unwrap()
});

/// LyricsMode client
pub struct LyricsMode {
    client: PageClient,
    base_url: String,
}

impl LyricsMode {
    pub fn new(client: PageClient) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Pages are grouped by the artist's first character:
    /// `/lyrics/{a}/{artist_slug}/{title_slug}.html`
    pub fn page_url(&self, artist: &str, title: &str) -> String {
        let artist = html::slug(artist, '_', true);
        let initial = artist
            .chars()
            .next()
            .filter(char::is_ascii_alphabetic)
            .unwrap_or('0');
        format!(
            "{}/lyrics/{}/{}/{}.html",
            self.base_url,
            initial,
            urlencoding::encode(&artist),
            urlencoding::encode(&html::slug(title, '_', true))
        )
    }
}

fn extract(page: &str) -> Option<String> {
    html::capture_text(page, &LYRICS_BLOCK)
}

#[async_trait]
impl LyricsSource for LyricsMode {
    fn kind(&self) -> SourceKind {
        SourceKind::LyricsMode
    }

    async fn fetch(&self, artist: &str, title: &str) -> Result<Option<String>, SourceError> {
        let url = self.page_url(artist, title);
        self.client.fetch_with(self.kind(), &url, extract).await
    }
}
