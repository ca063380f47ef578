/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use subgrab::app_config::{Config, LogLevel, TrackManifest};
use subgrab::errors::AppError;
use subgrab::subtitle_processor::SubtitleFormat;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.default_format, SubtitleFormat::Srt);
    assert_eq!(config.output_dir, ".");
    assert_eq!(config.auto_generated_marker, "auto-generated");
    assert_eq!(config.fallback_title, "video");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.auto_generated_marker = "".to_string();
    assert!(matches!(config.validate(), Err(AppError::Config(_))));

    let mut config = Config::default();
    config.auto_generated_marker = "auto/gen".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.fallback_title = "a:b".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.fallback_title = "  ".to_string();
    assert!(matches!(config.validate(), Err(AppError::Config(_))));

    let mut config = Config::default();
    config.output_dir = " ".to_string();
    assert!(config.validate().is_err());
}

/// Test that missing fields take their defaults
#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{ "default_format": "txt", "log_level": "debug" }"#)?;

    assert_eq!(config.default_format, SubtitleFormat::Txt);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.auto_generated_marker, "auto-generated");

    Ok(())
}

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let (config, created) = Config::load_or_create(&path)?;
    assert!(created);
    assert!(path.exists());
    assert_eq!(config.fallback_title, "video");

    let (_, created_again) = Config::load_or_create(&path)?;
    assert!(!created_again);

    Ok(())
}

/// Test that an unreadable config reports an error
#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());

    Ok(())
}

/// Test log level mapping
#[test]
fn test_log_level_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}

/// Test manifest loading and relative source resolution
#[test]
fn test_manifest_fromFile_withRelativeSources_shouldResolveAgainstManifestDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let manifest_json = r#"{
        "video_title": "Talk",
        "tracks": [
            { "language_name": "English", "base_url": "https://example.invalid/en", "is_auto_generated": true, "source": "en.xml" },
            { "language_name": "French", "source": "/abs/fr.xml" }
        ]
    }"#;
    let path = common::create_test_file(temp_dir.path(), "manifest.json", manifest_json)?;

    let manifest = TrackManifest::from_file(&path)?;

    assert_eq!(manifest.video_title.as_deref(), Some("Talk"));
    assert_eq!(manifest.tracks.len(), 2);
    assert_eq!(manifest.tracks[0].source, temp_dir.path().join("en.xml"));
    assert!(manifest.tracks[0].track.is_auto_generated);
    assert!(!manifest.tracks[1].track.is_auto_generated);
    assert_eq!(manifest.caption_tracks()[1].language_name, "French");

    Ok(())
}
