//! AZLyrics adapter
//!
//! Pages live at `/lyrics/{artist}/{title}.html`, both parts lowercased and
//! reduced to ASCII letters and digits. A leading "The" is dropped from the
//! artist name. The lyrics are the only unclassed `<div>` following the
//! site's usage-notice comment.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::client::PageClient;
use super::domain::{SourceError, SourceKind};
use super::html;
use super::traits::LyricsSource;

const BASE_URL: &str = "https://www.azlyrics.com";

static LYRICS_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!-- Usage of azlyrics\.com content.*?-->(.*?)</div>").unwrap()
});

/// AZLyrics client
pub struct AzLyrics {
    client: PageClient,
    base_url: String,
}

impl AzLyrics {
    pub fn new(client: PageClient) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Lyrics page URL for a song
    pub fn page_url(&self, artist: &str, title: &str) -> String {
        let artist = artist.trim();
        let artist = artist
            .strip_prefix("The ")
            .or_else(|| artist.strip_prefix("the "))
            .unwrap_or(artist);
        format!(
            "{}/lyrics/{}/{}.html",
            self.base_url,
            compact(artist),
            compact(title)
        )
    }
}

fn compact(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn extract(page: &str) -> Option<String> {
    html::capture_text(page, &LYRICS_BLOCK)
}

#[async_trait]
impl LyricsSource for AzLyrics {
    fn kind(&self) -> SourceKind {
        SourceKind::AzLyrics
    }

    async fn fetch(&self, artist: &str, title: &str) -> Result<Option<String>, SourceError> {
        let url = self.page_url(artist, title);
        self.client.fetch_with(self.kind(), &url, extract).await
    }
}
