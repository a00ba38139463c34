//! LyricWikia adapter
//!
//! Wiki pages are named `Artist:Title` with spaces turned into underscores;
//! the lyrics sit in `<div class="lyricbox">`.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::client::PageClient;
use super::domain::{SourceError, SourceKind};
use super::html;
use super::traits::LyricsSource;

const BASE_URL: &str = "https://lyrics.fandom.com/wiki";

static LYRICS_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<div class=['"]lyricbox['"][^>]*>(.*?)<div class=['"]lyricsbreak"#).unwrap()
});

/// Pages for songs the wiki knows nothing about still render, with this marker
const NOT_LICENSED: &str = "Unfortunately, we are not licensed to display the full lyrics";

/// LyricWikia client
pub struct LyricWikia {
    client: PageClient,
    base_url: String,
}

impl LyricWikia {
    pub fn new(client: PageClient) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn page_url(&self, artist: &str, title: &str) -> String {
        format!(
            "{}/{}:{}",
            self.base_url,
            wiki_name(artist),
            wiki_name(title)
        )
    }
}

fn wiki_name(value: &str) -> String {
    let joined = value.split_whitespace().collect::<Vec<_>>().join("_");
    urlencoding::encode(&joined).into_owned()
}

fn extract(page: &str) -> Option<String> {
    html::capture_text(page, &LYRICS_BLOCK).filter(|lyrics| !lyrics.contains(NOT_LICENSED))
}

#[async_trait]
impl LyricsSource for LyricWikia {
    fn kind(&self) -> SourceKind {
        SourceKind::LyricWikia
    }

    async fn fetch(&self, artist: &str, title: &str) -> Result<Option<String>, SourceError> {
        let url = self.page_url(artist, title);
        self.client.fetch_with(self.kind(), &url, extract).await
    }
}
