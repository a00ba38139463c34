//! Embedded lyrics tags.
//!
//! lofty maps [`ItemKey::Lyrics`] onto the field each container uses
//! (see [`AudioFormat::lyrics_key`](crate::model::AudioFormat::lyrics_key)).

use lofty::config::WriteOptions;
use lofty::error::{ErrorKind, LoftyError};
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag, TagExt};

use crate::model::Track;

/// Why lyrics could not be embedded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagSinkError {
    #[error("Cannot save lyrics to tag. Codec/Format not supported")]
    Unsupported,

    #[error("Cannot save lyrics to tag. The file is opened or in use.")]
    InUse,
}

impl From<LoftyError> for TagSinkError {
    fn from(e: LoftyError) -> Self {
        tracing::debug!(error = %e, "Tag write failed");
        match e.kind() {
            ErrorKind::Io(_) => TagSinkError::InUse,
            _ => TagSinkError::Unsupported,
        }
    }
}

/// Writes lyrics into a track's audio file.
pub trait TagWriter: Send + Sync {
    fn write_lyrics(&self, track: &Track, lyrics: &str) -> Result<(), TagSinkError>;
}

/// [`TagWriter`] backed by lofty. Re-opens the file on every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTagWriter;

impl TagWriter for LoftyTagWriter {
    fn write_lyrics(&self, track: &Track, lyrics: &str) -> Result<(), TagSinkError> {
        let path = &track.path;
        let mut tagged_file = Probe::open(path)?.read()?;

        // Get the primary tag type for this format, or create one
        let tag_type = tagged_file.primary_tag_type();
        if tagged_file.tag(tag_type).is_none() {
            tagged_file.insert_tag(Tag::new(tag_type));
        }
        let Some(tag) = tagged_file.tag_mut(tag_type) else {
            return Err(TagSinkError::Unsupported);
        };

        if !tag.insert_text(ItemKey::Lyrics, lyrics.to_string()) {
            return Err(TagSinkError::Unsupported);
        }

        tag.save_to_path(path, WriteOptions::default())?;
        tracing::debug!(
            path = %path.display(),
            field = track.format.map(|f| f.lyrics_key()).unwrap_or("?"),
            ?tag_type,
            "Wrote lyrics tag"
        );
        Ok(())
    }
}
