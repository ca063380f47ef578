use log::debug;
use roxmltree::{Document, Node};

use crate::errors::ParseError;

// @module: Timed-text XML reading

// @const: Element name of a single cue
const CUE_TAG: &str = "text";
// @const: Start offset attribute (seconds)
const START_ATTR: &str = "start";
// @const: Duration attribute (seconds)
const DURATION_ATTR: &str = "dur";

// @struct: Single timed caption unit
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    // @field: Start offset in seconds
    pub start_seconds: f64,

    // @field: Duration in seconds
    pub duration_seconds: f64,

    // @field: Decoded element text, untrimmed
    pub text: String,
}

impl Cue {
    pub fn new(start_seconds: f64, duration_seconds: f64, text: impl Into<String>) -> Self {
        Cue {
            start_seconds,
            duration_seconds,
            text: text.into(),
        }
    }

    /// End offset in seconds (start + duration)
    pub fn end_seconds(&self) -> f64 {
        self.start_seconds + self.duration_seconds
    }
}

/// Reader for the caption interchange XML served alongside a video.
///
/// Every `<text start=".." dur="..">` element becomes one [`Cue`], in
/// document order. Entities are decoded by the XML reader; nothing else
/// is done to the text.
pub struct TimedTextParser;

impl TimedTextParser {
    /// Parse a timed-text document into its ordered cue list
    pub fn parse(xml: &str) -> Result<Vec<Cue>, ParseError> {
        let document = Document::parse(xml)
            .map_err(|e| ParseError::Malformed(e.to_string()))?;

        let cues = document
            .descendants()
            .filter(|node| node.is_element() && node.has_tag_name(CUE_TAG))
            .enumerate()
            .map(|(index, node)| Self::read_cue(index, node))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Parsed {} cue(s) from timed-text document", cues.len());
        Ok(cues)
    }

    fn read_cue(index: usize, node: Node) -> Result<Cue, ParseError> {
        let start_seconds = Self::read_seconds(index, node, START_ATTR)?;
        let duration_seconds = Self::read_seconds(index, node, DURATION_ATTR)?;

        // Same as the DOM's textContent: every descendant text node, in order
        let text: String = node
            .descendants()
            .filter(|child| child.is_text())
            .filter_map(|child| child.text())
            .collect();

        Ok(Cue {
            start_seconds,
            duration_seconds,
            text,
        })
    }

    fn read_seconds(index: usize, node: Node, attribute: &'static str) -> Result<f64, ParseError> {
        let raw = node.attribute(attribute);
        let invalid = || ParseError::InvalidNumericField {
            index,
            attribute,
            value: raw.map(str::to_string),
        };

        let value: f64 = raw
            .ok_or_else(invalid)?
            .trim()
            .parse()
            .map_err(|_| invalid())?;

        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }

        Ok(value)
    }
}
