//! MusixMatch adapter
//!
//! Song pages are `/lyrics/{Artist-Slug}/{Title-Slug}`. The lyrics are split
//! over several `lyrics__content__*` spans (older layout) or
//! `mxm-lyrics__content` paragraphs (newer layout); every block is collected
//! in page order.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::client::PageClient;
use super::domain::{SourceError, SourceKind};
use super::html;
use super::traits::LyricsSource;

const BASE_URL: &str = "https://www.musixmatch.com";

static LYRICS_BLOCKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<(?:p|span) class="(?:mxm-lyrics__content|lyrics__content__[a-z]+)[^"]*"[^>]*>(.*?)</(?:p|span)>"#,
    )
    .unwrap()
});

/// Shown instead of lyrics for songs MusixMatch may not display
const RESTRICTED: &str = "Unfortunately we're not authorized to show these lyrics";

/// MusixMatch client
pub struct MusixMatch {
    client: PageClient,
    base_url: String,
}

impl MusixMatch {
    pub fn new(client: PageClient) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn page_url(&self, artist: &str, title: &str) -> String {
        format!(
            "{}/lyrics/{}/{}",
            self.base_url,
            urlencoding::encode(&html::slug(artist, '-', false)),
            urlencoding::encode(&html::slug(title, '-', false))
        )
    }
}

fn extract(page: &str) -> Option<String> {
    if page.contains(RESTRICTED) {
        return None;
    }
    html::capture_all_text(page, &LYRICS_BLOCKS)
}

#[async_trait]
impl LyricsSource for MusixMatch {
    fn kind(&self) -> SourceKind {
        SourceKind::MusixMatch
    }

    async fn fetch(&self, artist: &str, title: &str) -> Result<Option<String>, SourceError> {
        let url = self.page_url(artist, title);
        self.client.fetch_with(self.kind(), &url, extract).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_keeps_case() {
        let source = MusixMatch::new(PageClient::new().unwrap());
        assert_eq!(
            source.page_url("Daft Punk", "One More Time"),
            "https://www.musixmatch.com/lyrics/Daft-Punk/One-More-Time"
        );
    }

    #[test]
    fn test_extract_joins_split_blocks() {
        let page = r#"<span class="lyrics__content__ok">One more time
We're gonna celebrate</span><div>ad</div><span class="lyrics__content__warning">Oh yeah, all right</span>"#;
        assert_eq!(
            extract(page).as_deref(),
            Some("One more time\nWe're gonna celebrate\nOh yeah, all right")
        );
    }

    #[test]
    fn test_extract_restricted_page() {
        let page = format!(
            "<p class=\"mxm-lyrics__content\">{}</p>",
            RESTRICTED
        );
        assert_eq!(extract(&page), None);
    }
}
