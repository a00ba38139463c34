//! Lyrics resolution.
//!
//! For each track the engine decides whether a download is needed, walks
//! the [`SourceChain`] until one site answers, retries once with a
//! stripped-down title when nothing was found, and hands the result to
//! [`persist`](crate::persist::persist).

use crate::config::RunConfig;
use crate::model::Track;
use crate::normalize;
use crate::persist::{self, PersistOutcome, TagWriter};
use crate::report::RunAggregate;
use crate::sources::{SourceChain, SourceError};

/// A search with the tagged title plus at most one with the decoration
/// stripped.
pub const MAX_PASSES: usize = 2;

/// How a track was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Artist or title missing, nothing attempted
    MissingMetadata,
    /// Every enabled sink already holds lyrics
    AlreadyPresent,
    /// Sources were queried and the outcome persisted
    Attempted {
        passes: usize,
        persisted: PersistOutcome,
    },
}

/// Whether any enabled sink still needs lyrics for this track.
pub fn download_required(track: &Track, config: &RunConfig) -> bool {
    if config.overwrite {
        return true;
    }
    (config.save_to_file && !track.file_present) || (config.save_to_tag && !track.tag_present)
}

/// Find lyrics for one track and persist them.
pub async fn resolve(
    track: &mut Track,
    chain: &SourceChain,
    config: &RunConfig,
    tags: &dyn TagWriter,
    aggregate: &mut RunAggregate,
) -> Resolution {
    if !track.has_valid_metadata() {
        return Resolution::MissingMetadata;
    }
    if !download_required(track, config) {
        tracing::debug!(track = %track.display_name(), "Lyrics already present");
        return Resolution::AlreadyPresent;
    }
    if chain.is_empty() {
        track.set_error("No lyrics sources are enabled.");
    }

    let mut passes = 0;
    for pass in 1..=MAX_PASSES {
        passes = pass;
        run_pass(track, chain).await;

        if track.has_lyrics() || pass == MAX_PASSES || !shorten_title(track) {
            break;
        }
    }

    let persisted = persist::persist(track, config, tags, aggregate);
    Resolution::Attempted { passes, persisted }
}

/// Ask each source in order until one returns lyrics.
async fn run_pass(track: &mut Track, chain: &SourceChain) {
    for source in chain.iter() {
        if track.has_lyrics() {
            break;
        }
        let Some((artist, title)) = track.query() else {
            return;
        };
        let (artist, title) = (artist.to_string(), title.to_string());
        let kind = source.kind();

        tracing::debug!(target: "lyrico::sources", source = %kind, %artist, %title, "Searching");
        match source.fetch(&artist, &title).await {
            Ok(Some(lyrics)) if !lyrics.trim().is_empty() => {
                track.lyrics = Some(lyrics);
                track.source = Some(kind);
                track.error = None;
            }
            Ok(_) => track.set_error(SourceError::NotFound(kind).to_string()),
            Err(e) => {
                tracing::warn!(source = %kind, error = %e, "Lyrics lookup failed");
                track.set_error(e.to_string());
            }
        }
    }
}

/// Strip the trailing decoration from the title for another pass.
///
/// Returns false when there is nothing left worth searching for.
fn shorten_title(track: &mut Track) -> bool {
    let Some(title) = track.title.as_deref() else {
        return false;
    };
    if !normalize::is_strippable(title) {
        return false;
    }
    let stripped = normalize::strip_decoration(title);
    if stripped.is_empty() || stripped == title {
        return false;
    }
    tracing::debug!(from = %title, to = %stripped, "Retrying with shortened title");
    track.title = Some(stripped);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::SinkOutcome;
    use crate::report::{SinkStatus, file_status, tag_status};
    use crate::sources::SourceKind;
    use crate::sources::traits::mocks::MockSource;
    use crate::test_utils::{MockTagWriter, chain_of, file_and_tag_config, track, track_in};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_overwrite_always_requires_download() {
        let config = RunConfig {
            overwrite: true,
            ..file_and_tag_config()
        };
        let mut t = track("A", "B");
        t.file_present = true;
        t.tag_present = true;
        assert!(download_required(&t, &config));
    }

    #[test]
    fn test_no_download_when_sinks_disabled_or_satisfied() {
        let both_off = RunConfig {
            save_to_file: false,
            save_to_tag: false,
            ..RunConfig::default()
        };
        assert!(!download_required(&track("A", "B"), &both_off));

        let mut t = track("A", "B");
        t.file_present = true;
        assert!(!download_required(&t, &RunConfig::default()));
        assert!(download_required(&t, &file_and_tag_config()));
    }

    #[tokio::test]
    async fn test_second_source_hit_skips_normalization() {
        let temp = TempDir::new().unwrap();
        let s1 = Arc::new(MockSource::miss(SourceKind::LyricWikia));
        let s2 = Arc::new(MockSource::hit(SourceKind::LyricsNMusic, "lyrics text"));
        let chain = chain_of(&[s1.clone(), s2.clone()]);
        let mut t = track_in(temp.path(), "A", "B (Live)");
        let mut aggregate = RunAggregate::new();

        let resolution = resolve(
            &mut t,
            &chain,
            &RunConfig::default(),
            &MockTagWriter::new(),
            &mut aggregate,
        )
        .await;

        assert!(matches!(resolution, Resolution::Attempted { passes: 1, .. }));
        assert_eq!(t.lyrics.as_deref(), Some("lyrics text"));
        assert_eq!(t.source, Some(SourceKind::LyricsNMusic));
        assert_eq!(t.title.as_deref(), Some("B (Live)"));
        assert!(t.error.is_none());
        assert_eq!(s1.calls().len(), 1);
        assert_eq!(s2.calls().len(), 1);
        assert_eq!(aggregate.saved_to_file, 1);
    }

    #[tokio::test]
    async fn test_all_miss_retries_with_stripped_title() {
        let temp = TempDir::new().unwrap();
        let s1 = Arc::new(MockSource::miss(SourceKind::LyricWikia));
        let s2 = Arc::new(MockSource::miss(SourceKind::AzLyrics));
        let chain = chain_of(&[s1.clone(), s2.clone()]);
        let config = file_and_tag_config();
        let tags = MockTagWriter::new();
        let mut t = track_in(temp.path(), "A", "B (Live)");
        let mut aggregate = RunAggregate::new();

        let resolution = resolve(&mut t, &chain, &config, &tags, &mut aggregate).await;

        let Resolution::Attempted { passes, persisted } = resolution else {
            panic!("expected an attempt");
        };
        assert_eq!(passes, 2);
        assert!(!persisted.lyrics_found);
        assert_eq!(persisted.file, SinkOutcome::Skipped);

        let expected = vec![
            ("A".to_string(), "B (Live)".to_string()),
            ("A".to_string(), "B".to_string()),
        ];
        assert_eq!(s1.calls(), expected);
        assert_eq!(s2.calls(), expected);

        assert!(t.lyrics.is_none());
        assert_eq!(t.title.as_deref(), Some("B"));
        assert_eq!(t.error.as_deref(), Some("Lyrics not found on AZLyrics"));
        assert_eq!(file_status(&t, &config), SinkStatus::Failed);
        assert_eq!(tag_status(&t, &config), SinkStatus::Failed);
        assert!(tags.writes().is_empty());
    }

    #[tokio::test]
    async fn test_stripped_title_can_succeed() {
        let temp = TempDir::new().unwrap();
        let s1 = Arc::new(MockSource::hit_for_title(SourceKind::MusixMatch, "B", "words"));
        let chain = chain_of(&[s1.clone()]);
        let mut t = track_in(temp.path(), "A", "B [Remastered]");
        let mut aggregate = RunAggregate::new();

        resolve(
            &mut t,
            &chain,
            &RunConfig::default(),
            &MockTagWriter::new(),
            &mut aggregate,
        )
        .await;

        assert_eq!(t.lyrics.as_deref(), Some("words"));
        assert_eq!(t.source, Some(SourceKind::MusixMatch));
        assert!(t.saved_to_file);
        assert!(t.error.is_none());
    }

    #[tokio::test]
    async fn test_plain_title_gets_single_pass() {
        let s1 = Arc::new(MockSource::miss(SourceKind::LyricWikia));
        let chain = chain_of(&[s1.clone()]);
        let mut t = track("A", "B");
        let mut aggregate = RunAggregate::new();

        let resolution = resolve(
            &mut t,
            &chain,
            &RunConfig::default(),
            &MockTagWriter::new(),
            &mut aggregate,
        )
        .await;

        assert!(matches!(resolution, Resolution::Attempted { passes: 1, .. }));
        assert_eq!(s1.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_unbalanced_title_gets_single_pass() {
        let s1 = Arc::new(MockSource::miss(SourceKind::LyricWikia));
        let chain = chain_of(&[s1.clone()]);
        let mut t = track("A", "Song (Remix");
        let mut aggregate = RunAggregate::new();

        let resolution = resolve(
            &mut t,
            &chain,
            &RunConfig::default(),
            &MockTagWriter::new(),
            &mut aggregate,
        )
        .await;

        assert!(matches!(resolution, Resolution::Attempted { passes: 1, .. }));
        assert_eq!(
            s1.calls(),
            vec![("A".to_string(), "Song (Remix".to_string())]
        );
        assert_eq!(t.title.as_deref(), Some("Song (Remix"));
    }

    #[tokio::test]
    async fn test_source_error_moves_to_next_source() {
        let temp = TempDir::new().unwrap();
        let s1 = Arc::new(MockSource::failing(
            SourceKind::LyricWikia,
            SourceError::Network("timed out".to_string()),
        ));
        let s2 = Arc::new(MockSource::hit(SourceKind::LyricsMode, "words"));
        let chain = chain_of(&[s1, s2]);
        let mut t = track_in(temp.path(), "A", "B");
        let mut aggregate = RunAggregate::new();

        resolve(
            &mut t,
            &chain,
            &RunConfig::default(),
            &MockTagWriter::new(),
            &mut aggregate,
        )
        .await;

        assert_eq!(t.source, Some(SourceKind::LyricsMode));
        assert!(t.error.is_none());
    }

    #[tokio::test]
    async fn test_no_sources_terminates() {
        let chain = chain_of(&[]);
        let mut t = track("A", "B (Live) [Demo]");
        let mut aggregate = RunAggregate::new();

        let resolution = resolve(
            &mut t,
            &chain,
            &RunConfig::default(),
            &MockTagWriter::new(),
            &mut aggregate,
        )
        .await;

        assert!(matches!(resolution, Resolution::Attempted { .. }));
        assert!(t.lyrics.is_none());
        assert!(t.error.is_some());
    }

    #[tokio::test]
    async fn test_present_lyrics_skip_network() {
        let s1 = Arc::new(MockSource::hit(SourceKind::LyricWikia, "words"));
        let chain = chain_of(&[s1.clone()]);
        let tags = MockTagWriter::new();
        let mut t = track("A", "B");
        t.file_present = true;
        let mut aggregate = RunAggregate::new();

        let resolution = resolve(&mut t, &chain, &RunConfig::default(), &tags, &mut aggregate).await;

        assert_eq!(resolution, Resolution::AlreadyPresent);
        assert!(s1.calls().is_empty());
        assert!(tags.writes().is_empty());
        assert_eq!(file_status(&t, &RunConfig::default()), SinkStatus::Present);
    }

    #[tokio::test]
    async fn test_overwrite_downloads_again() {
        let temp = TempDir::new().unwrap();
        let s1 = Arc::new(MockSource::hit(SourceKind::LyricWikia, "new words"));
        let chain = chain_of(&[s1.clone()]);
        let config = RunConfig {
            overwrite: true,
            ..RunConfig::default()
        };
        let mut t = track_in(temp.path(), "A", "B");
        std::fs::write(t.lyrics_path.as_ref().unwrap(), "old words").unwrap();
        t.file_present = true;
        let mut aggregate = RunAggregate::new();

        resolve(&mut t, &chain, &config, &MockTagWriter::new(), &mut aggregate).await;

        let written = std::fs::read_to_string(t.lyrics_path.as_ref().unwrap()).unwrap();
        assert!(written.ends_with("new words"));
        assert_eq!(file_status(&t, &config), SinkStatus::Saved);
    }

    #[tokio::test]
    async fn test_missing_metadata_is_never_resolved() {
        let s1 = Arc::new(MockSource::hit(SourceKind::LyricWikia, "words"));
        let chain = chain_of(&[s1.clone()]);
        let mut t = Track::new("/music/untagged.mp3");
        let mut aggregate = RunAggregate::new();

        let resolution = resolve(
            &mut t,
            &chain,
            &RunConfig::default(),
            &MockTagWriter::new(),
            &mut aggregate,
        )
        .await;

        assert_eq!(resolution, Resolution::MissingMetadata);
        assert!(s1.calls().is_empty());
    }
}
