//! Run Report
//!
//! Counts what happened during a run and renders the final log: one line per
//! track with the outcome of each sink, followed by a short summary.

use std::fmt;

use crate::config::RunConfig;
use crate::engine::download_required;
use crate::model::Track;

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunAggregate {
    pub total_tracks: usize,
    pub valid_metadata: usize,
    pub saved_to_file: usize,
    pub saved_to_tag: usize,
}

impl RunAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a discovered track once its metadata has been read.
    pub fn record_track(&mut self, track: &Track) {
        self.total_tracks += 1;
        if track.has_valid_metadata() {
            self.valid_metadata += 1;
        }
    }

    pub fn record_file_saved(&mut self) {
        self.saved_to_file += 1;
    }

    pub fn record_tag_saved(&mut self) {
        self.saved_to_tag += 1;
    }
}

/// Final state of one sink for one track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStatus {
    /// Lyrics were written
    Saved,
    /// Download or write failed, see the track's error
    Failed,
    /// Sink disabled in the configuration
    Ignored,
    /// Lyrics were already there, nothing was downloaded
    Present,
}

impl SinkStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SinkStatus::Saved => "Saved",
            SinkStatus::Failed => "Failed",
            SinkStatus::Ignored => "Ignored",
            SinkStatus::Present => "Present",
        }
    }

    fn resolve(enabled: bool, saved: bool, track: &Track, config: &RunConfig) -> Self {
        if !enabled {
            SinkStatus::Ignored
        } else if !download_required(track, config) {
            SinkStatus::Present
        } else if saved {
            SinkStatus::Saved
        } else {
            SinkStatus::Failed
        }
    }
}

impl fmt::Display for SinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of the sidecar file sink.
pub fn file_status(track: &Track, config: &RunConfig) -> SinkStatus {
    SinkStatus::resolve(config.save_to_file, track.saved_to_file, track, config)
}

/// Status of the embedded tag sink.
pub fn tag_status(track: &Track, config: &RunConfig) -> SinkStatus {
    SinkStatus::resolve(config.save_to_tag, track.saved_to_tag, track, config)
}

/// One log line, numbered from 1.
pub fn log_line(number: usize, track: &Track, config: &RunConfig) -> String {
    let source = track.source.map(|s| s.name()).unwrap_or("-");
    format!(
        "{}. \t{}\t{}\t{}\t\t{}\t\t{}",
        number,
        file_status(track, config),
        tag_status(track, config),
        source,
        track.display_name(),
        track.error.as_deref().unwrap_or("")
    )
}

/// Render the per-track section of the final log.
pub fn build_log(tracks: &[Track], config: &RunConfig) -> String {
    let mut log = String::from("#. \tFile\tTag\tSource\t\tSong\t\tError\n");
    for (i, track) in tracks.iter().enumerate() {
        log.push_str(&log_line(i + 1, track, config));
        log.push('\n');
    }
    log
}

/// Summary footer printed after the log.
pub fn summary(aggregate: &RunAggregate) -> String {
    format!(
        "Metadata extracted for {}/{} songs.\nLyrics saved to file: {}\nLyrics saved to tag: {}",
        aggregate.valid_metadata,
        aggregate.total_tracks,
        aggregate.saved_to_file,
        aggregate.saved_to_tag
    )
}
