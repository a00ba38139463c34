//! The download command.

use std::path::Path;
use tokio::runtime::Runtime;

use crate::config::RunConfig;
use crate::engine::{self, Resolution};
use crate::metadata;
use crate::model::Track;
use crate::persist::{LoftyTagWriter, PersistOutcome, SinkOutcome};
use crate::report::{self, RunAggregate};
use crate::scanner;
use crate::sources::SourceChain;

/// Scan `directory`, download lyrics for every song and print the log.
pub fn cmd_download(rt: &Runtime, directory: &Path, config: &RunConfig) -> anyhow::Result<()> {
    let files = scanner::collect_audio_files(directory)?;
    println!("{} songs detected.", files.len());

    let mut aggregate = RunAggregate::new();
    let mut tracks: Vec<Track> = files
        .iter()
        .map(|path| metadata::extract(path, config))
        .collect();
    for track in &tracks {
        aggregate.record_track(track);
    }
    println!(
        "Metadata extracted for {}/{} songs.",
        aggregate.valid_metadata, aggregate.total_tracks
    );

    let chain = SourceChain::from_config(config)?;
    tracing::info!(sources = ?chain.kinds(), count = chain.len(), "Source chain ready");
    let tags = LoftyTagWriter;

    rt.block_on(async {
        for track in tracks.iter_mut() {
            if !track.has_valid_metadata() {
                print_ignored(track);
                continue;
            }

            println!();
            if engine::download_required(track, config) {
                println!("Downloading: {}", track.display_name());
            }
            let resolution = engine::resolve(track, &chain, config, &tags, &mut aggregate).await;
            print_resolution(track, &resolution);
        }
    });

    println!("\nBuilding log...");
    println!("Log generated {}", chrono::Local::now().to_rfc3339());
    println!();
    print!("{}", report::build_log(&tracks, config));
    println!();
    println!("{}", report::summary(&aggregate));
    println!("FINISHED");
    Ok(())
}

fn print_ignored(track: &Track) {
    let name = match track.title {
        Some(ref title) => title.clone(),
        None => track.path.display().to_string(),
    };
    println!(
        "{} was ignored. {}",
        name,
        track.error.as_deref().unwrap_or("")
    );
}

fn print_resolution(track: &Track, resolution: &Resolution) {
    match resolution {
        Resolution::MissingMetadata => print_ignored(track),
        Resolution::AlreadyPresent => {
            println!("Skipping {}", track.display_name());
            println!("Lyrics already present.");
        }
        Resolution::Attempted { persisted, .. } => print_persisted(track, persisted),
    }
}

fn print_persisted(track: &Track, outcome: &PersistOutcome) {
    if !outcome.lyrics_found {
        println!("Failed: {}", track.error.as_deref().unwrap_or("Lyrics not found."));
        return;
    }
    for (sink, status) in [("file", &outcome.file), ("tag", &outcome.tag)] {
        match status {
            SinkOutcome::Saved => println!("Success: Lyrics saved to {}.", sink),
            SinkOutcome::Failed(message) => println!("Failed: {}", message),
            SinkOutcome::Skipped => {}
        }
    }
}
