//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\lyrico\config.toml
//! - macOS: ~/Library/Application Support/lyrico/config.toml
//! - Linux: ~/.config/lyrico/config.toml
//!
//! The file is read once at startup into a [`Config`], which is then frozen
//! into an immutable [`RunConfig`] (with the `--overwrite` flag applied) and
//! passed explicitly to everything that needs it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::sources::SourceKind;

/// On-disk configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What to do with downloaded lyrics
    pub actions: ActionsConfig,

    /// Where to put lyrics files
    pub paths: PathsConfig,

    /// Which lyrics sites to ask, and in which order
    pub sources: SourcesConfig,
}

/// Persistence toggles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Write lyrics to a sidecar text file
    pub save_to_file: bool,

    /// Embed lyrics in the audio file's tag
    pub save_to_tag: bool,

    /// Download again even when lyrics are already present
    pub overwrite: bool,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            save_to_file: true,
            save_to_tag: false,
            overwrite: false,
        }
    }
}

/// Filesystem locations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory for lyrics files (unset = next to each audio file)
    pub lyrics_dir: Option<PathBuf>,
}

/// Per-site toggles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub lyric_wikia: bool,
    pub lyrics_n_music: bool,
    pub musix_match: bool,
    pub lyricsmode: bool,
    pub az_lyrics: bool,

    /// Priority order. Sites left out are appended in default order.
    pub order: Vec<SourceKind>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            lyric_wikia: true,
            lyrics_n_music: true,
            musix_match: true,
            lyricsmode: true,
            az_lyrics: true,
            order: SourceKind::ALL.to_vec(),
        }
    }
}

impl SourcesConfig {
    /// Whether a site is switched on.
    pub fn is_enabled(&self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::LyricWikia => self.lyric_wikia,
            SourceKind::LyricsNMusic => self.lyrics_n_music,
            SourceKind::MusixMatch => self.musix_match,
            SourceKind::LyricsMode => self.lyricsmode,
            SourceKind::AzLyrics => self.az_lyrics,
        }
    }

    /// Config keys of the sites switched off.
    pub fn disabled_keys(&self) -> Vec<&'static str> {
        SourceKind::ALL
            .into_iter()
            .filter(|kind| !self.is_enabled(*kind))
            .map(SourceKind::key)
            .collect()
    }

    /// Enabled sites in priority order, without duplicates.
    pub fn enabled_in_order(&self) -> Vec<SourceKind> {
        let mut ordered: Vec<SourceKind> = Vec::with_capacity(SourceKind::ALL.len());
        for kind in self.order.iter().chain(SourceKind::ALL.iter()) {
            if !ordered.contains(kind) {
                ordered.push(*kind);
            }
        }
        ordered.retain(|kind| self.is_enabled(*kind));
        ordered
    }
}

/// Immutable settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub save_to_file: bool,
    pub save_to_tag: bool,
    pub overwrite: bool,
    /// Enabled sources, highest priority first
    pub sources: Vec<SourceKind>,
    pub lyrics_dir: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Config::default().to_run_config(false)
    }
}

impl Config {
    /// Freeze into the settings for a run. `overwrite_flag` comes from the
    /// command line and wins over the file when set.
    pub fn to_run_config(&self, overwrite_flag: bool) -> RunConfig {
        RunConfig {
            save_to_file: self.actions.save_to_file,
            save_to_tag: self.actions.save_to_tag,
            overwrite: overwrite_flag || self.actions.overwrite,
            sources: self.sources.enabled_in_order(),
            lyrics_dir: self.paths.lyrics_dir.as_deref().map(expand_home),
        }
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lyrico"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location.
///
/// Returns default config if the file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Load the config, writing a default file first if none exists yet.
pub fn load_or_init() -> Config {
    if let Some(path) = config_path()
        && !path.exists()
    {
        match save_to(&Config::default(), &path) {
            Ok(()) => println!("Created default configuration at {}", path.display()),
            Err(e) => tracing::warn!("Could not write default config: {}", e),
        }
    }
    load()
}

/// Save configuration to a file.
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
