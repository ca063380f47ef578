/*!
 * # subgrab - caption track converter
 *
 * A Rust library for turning the timed-text XML captions served with a video
 * page into plain-text subtitle files.
 *
 * ## Features
 *
 * - Parse timed-text XML into an ordered list of cues
 * - Render cues as:
 *   - SRT (numbered, time-coded blocks)
 *   - a flat transcript (cue text only)
 * - Build deterministic, file-system safe output names from the video title,
 *   the caption language and whether the track is auto-generated
 * - Convert every track of a video concurrently
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timed_text`: Timed-text XML parsing
 * - `timecode`: `HH:MM:SS,mmm` time codes
 * - `subtitle_processor`: Format conversion and caption tracks
 * - `file_utils`: Output file naming and file system operations
 * - `app_config`: Configuration and track manifests
 * - `app_controller`: Single and batch conversion workflows
 * - `errors`: Custom error types for the application
 *
 * The conversion core holds no global state and performs no I/O, so it can be
 * called from any number of threads at once.
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;
pub mod timecode;
pub mod timed_text;

// Re-export main types for easier usage
pub use app_config::{Config, TrackManifest};
pub use app_controller::Controller;
pub use errors::{AppError, ConversionError, ParseError};
pub use file_utils::{FileManager, NamingContext};
pub use subtitle_processor::{CaptionDocument, CaptionTrack, FormatConverter, SubtitleFormat};
pub use timecode::format_timecode;
pub use timed_text::{Cue, TimedTextParser};
