use std::fmt;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{ConversionError, ParseError};
use crate::file_utils::{FileManager, NamingContext};
use crate::timecode::format_timecode;
use crate::timed_text::{Cue, TimedTextParser};

// @module: Caption format conversion

// @const: Separator between start and end time codes
const TIME_RANGE_ARROW: &str = " --> ";

/// Output format selected by the caller
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    // @format: Numbered, time-coded cues
    #[default]
    Srt,
    // @format: Cue text only
    Txt,
}

impl SubtitleFormat {
    // @returns: File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Txt => "txt",
        }
    }

    // @returns: Human readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Srt => "SRT",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Renders cue lists into the two plain-text output formats.
///
/// The renderers are total over any cue list; only the `*_xml` entry points
/// can fail, and only because the document could not be parsed.
pub struct FormatConverter;

impl FormatConverter {
    /// Render cues as numbered SRT blocks.
    ///
    /// Every block, including the last, ends with a blank line.
    pub fn to_subtitle_format(cues: &[Cue]) -> String {
        let mut output = String::new();

        for (i, cue) in cues.iter().enumerate() {
            output.push_str(&format!(
                "{}\n{}{}{}\n{}\n\n",
                i + 1,
                format_timecode(cue.start_seconds),
                TIME_RANGE_ARROW,
                format_timecode(cue.end_seconds()),
                cue.text
            ));
        }

        output
    }

    /// Render cues as a flat transcript, one cue per line.
    ///
    /// Only the whole result is trimmed, inner lines are left alone.
    pub fn to_transcript_format(cues: &[Cue]) -> String {
        let mut output = String::new();

        for cue in cues {
            output.push_str(&cue.text);
            output.push('\n');
        }

        output.trim().to_string()
    }

    /// Render cues in the requested format
    pub fn render(cues: &[Cue], format: SubtitleFormat) -> String {
        match format {
            SubtitleFormat::Srt => Self::to_subtitle_format(cues),
            SubtitleFormat::Txt => Self::to_transcript_format(cues),
        }
    }

    /// Parse a timed-text document and render it in the requested format
    pub fn convert_xml(xml: &str, format: SubtitleFormat) -> Result<String, ConversionError> {
        let cues = TimedTextParser::parse(xml)?;
        debug!("Rendering {} cue(s) as {}", cues.len(), format.display_name());
        Ok(Self::render(&cues, format))
    }

    pub fn xml_to_srt(xml: &str) -> Result<String, ConversionError> {
        Self::convert_xml(xml, SubtitleFormat::Srt)
    }

    pub fn xml_to_txt(xml: &str) -> Result<String, ConversionError> {
        Self::convert_xml(xml, SubtitleFormat::Txt)
    }
}

// @struct: Caption track advertised by the video page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrack {
    // @field: Display name of the language
    pub language_name: String,

    // @field: Where the timed-text document lives (never fetched here)
    #[serde(default)]
    pub base_url: String,

    // @field: Machine generated captions
    #[serde(default)]
    pub is_auto_generated: bool,
}

impl CaptionTrack {
    pub fn new(language_name: impl Into<String>, base_url: impl Into<String>, is_auto_generated: bool) -> Self {
        CaptionTrack {
            language_name: language_name.into(),
            base_url: base_url.into(),
            is_auto_generated,
        }
    }

    /// Split tracks into (auto-generated, manual), keeping their order
    pub fn split_by_origin(tracks: &[CaptionTrack]) -> (Vec<&CaptionTrack>, Vec<&CaptionTrack>) {
        tracks.iter().partition(|track| track.is_auto_generated)
    }
}

/// A caption track together with its parsed cues
#[derive(Debug, Clone)]
pub struct CaptionDocument {
    /// Track the cues came from
    pub track: CaptionTrack,

    /// Cues in document order
    pub cues: Vec<Cue>,
}

impl CaptionDocument {
    /// Parse the timed-text document fetched for `track`
    pub fn from_xml(track: CaptionTrack, xml: &str) -> Result<Self, ParseError> {
        let cues = TimedTextParser::parse(xml)?;
        Ok(CaptionDocument { track, cues })
    }

    /// Render the cues in the requested format
    pub fn render(&self, format: SubtitleFormat) -> String {
        FormatConverter::render(&self.cues, format)
    }

    /// Output file name for this track
    pub fn file_name(&self, video_title: &str, format: SubtitleFormat, auto_generated_marker: &str) -> String {
        let context = NamingContext {
            video_title: video_title.to_string(),
            language_name: self.track.language_name.clone(),
            is_auto_generated: self.track.is_auto_generated,
            extension: format.extension().to_string(),
        };
        FileManager::build_file_name(&context, auto_generated_marker)
    }
}

impl fmt::Display for CaptionDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Caption Document")?;
        writeln!(f, "Language: {}", self.track.language_name)?;
        writeln!(f, "Auto-generated: {}", self.track.is_auto_generated)?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        Ok(())
    }
}
