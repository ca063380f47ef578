use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::{CaptionTrack, SubtitleFormat};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Format used when the command line does not pick one
    #[serde(default)]
    pub default_format: SubtitleFormat,

    /// Directory converted files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Wording of the auto-generated language suffix
    #[serde(default = "default_auto_generated_marker")]
    pub auto_generated_marker: String,

    /// Title used when the video title is unknown
    #[serde(default = "default_fallback_title")]
    pub fallback_title: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_auto_generated_marker() -> String {
    "auto-generated".to_string()
}

fn default_fallback_title() -> String {
    "video".to_string()
}

impl Config {

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.output_dir.trim().is_empty() {
            return Err(AppError::Config("output_dir must not be empty".to_string()));
        }

        if self.auto_generated_marker.trim().is_empty() {
            return Err(AppError::Config("auto_generated_marker must not be empty".to_string()));
        }

        if FileManager::has_forbidden_chars(&self.auto_generated_marker) {
            return Err(AppError::Config(format!(
                "auto_generated_marker contains a character not allowed in file names: {}",
                self.auto_generated_marker
            )));
        }

        if self.fallback_title.trim().is_empty() {
            return Err(AppError::Config("fallback_title must not be empty".to_string()));
        }

        if FileManager::has_forbidden_chars(&self.fallback_title) {
            return Err(AppError::Config(format!(
                "fallback_title contains a character not allowed in file names: {}",
                self.fallback_title
            )));
        }

        Ok(())
    }

    /// Load the configuration at `path`, writing the defaults there first if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

            return Ok((config, false));
        }

        let config = Config::default();
        config.save(path)?;
        Ok((config, true))
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        FileManager::write_to_file(path, &config_json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_format: SubtitleFormat::default(),
            output_dir: default_output_dir(),
            auto_generated_marker: default_auto_generated_marker(),
            fallback_title: default_fallback_title(),
            log_level: LogLevel::default(),
        }
    }
}

/// One caption track of a manifest, with the local copy of its document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(flatten)]
    pub track: CaptionTrack,

    /// Path of the already downloaded timed-text XML
    pub source: PathBuf,
}

/// Caption tracks of one video, as handed over by the page collector
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackManifest {
    #[serde(default)]
    pub video_title: Option<String>,

    #[serde(default)]
    pub tracks: Vec<ManifestEntry>,
}

impl TrackManifest {
    /// Load a manifest from a JSON file.
    ///
    /// Relative `source` paths are resolved against the manifest's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        let mut manifest: TrackManifest = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;

        let base_dir = path.parent().unwrap_or(Path::new("."));
        for entry in &mut manifest.tracks {
            if entry.source.is_relative() {
                entry.source = base_dir.join(&entry.source);
            }
        }

        Ok(manifest)
    }

    /// Tracks without their sources
    pub fn caption_tracks(&self) -> Vec<CaptionTrack> {
        self.tracks.iter().map(|entry| entry.track.clone()).collect()
    }
}
