/*!
 * Tests for timed-text parsing
 */

use anyhow::Result;
use subgrab::errors::ParseError;
use subgrab::timed_text::{Cue, TimedTextParser};
use crate::common;

/// Test parsing a complete document
#[test]
fn test_parse_withSampleDocument_shouldReadAllCues() -> Result<()> {
    let cues = TimedTextParser::parse(common::SAMPLE_TIMED_TEXT)?;

    assert_eq!(cues.len(), 3);
    assert_eq!(cues[0], Cue::new(0.5, 2.1, "Hello & welcome"));
    assert_eq!(cues[1], Cue::new(2.6, 3.0, "to the show"));
    assert_eq!(cues[2].start_seconds, 3661.5);
    assert_eq!(cues[2].duration_seconds, 1.25);

    Ok(())
}

/// Test that document order wins over timing order
#[test]
fn test_parse_withOutOfOrderCues_shouldKeepDocumentOrder() -> Result<()> {
    let xml = common::timed_text(&[("20", "1", "later"), ("5", "1", "earlier"), ("5", "30", "overlap")]);
    let cues = TimedTextParser::parse(&xml)?;

    let texts: Vec<&str> = cues.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["later", "earlier", "overlap"]);

    Ok(())
}

/// Test that cue text whitespace is kept as-is
#[test]
fn test_parse_withPaddedText_shouldNotTrim() -> Result<()> {
    let xml = common::timed_text(&[("1", "1", "  two\n lines  ")]);
    let cues = TimedTextParser::parse(&xml)?;

    assert_eq!(cues[0].text, "  two\n lines  ");

    Ok(())
}

/// Test that an element without content is still a cue
#[test]
fn test_parse_withEmptyElements_shouldProduceEmptyText() -> Result<()> {
    let xml = r#"<transcript><text start="1" dur="1"/><text start="2" dur="1"></text></transcript>"#;
    let cues = TimedTextParser::parse(xml)?;

    assert_eq!(cues.len(), 2);
    assert!(cues.iter().all(|c| c.text.is_empty()));

    Ok(())
}

/// Test that a document without cues is valid
#[test]
fn test_parse_withNoCues_shouldReturnEmptyList() -> Result<()> {
    assert!(TimedTextParser::parse("<transcript></transcript>")?.is_empty());
    assert!(TimedTextParser::parse("<transcript/>")?.is_empty());
    Ok(())
}

/// Test that entities are decoded exactly once
#[test]
fn test_parse_withDoubleEncodedEntity_shouldDecodeOnce() -> Result<()> {
    let xml = common::timed_text(&[("0", "1", "it&amp;#39;s &lt;fine&gt;")]);
    let cues = TimedTextParser::parse(&xml)?;

    assert_eq!(cues[0].text, "it&#39;s <fine>");

    Ok(())
}

/// Test end offset derivation
#[test]
fn test_cue_endSeconds_shouldAddDuration() {
    let cue = Cue::new(10.0, 2.5, "x");
    assert_eq!(cue.end_seconds(), 12.5);
}

/// Test that unclosed elements are rejected
#[test]
fn test_parse_withUnclosedTag_shouldFailWithMalformed() {
    let xml = r#"<transcript><text start="1" dur="1">open"#;
    let err = TimedTextParser::parse(xml).unwrap_err();
    assert!(matches!(err, ParseError::Malformed(_)));
}

/// Test that mismatched closing tags are rejected
#[test]
fn test_parse_withMismatchedTags_shouldFailWithMalformed() {
    let xml = r#"<transcript><text start="1" dur="1">x</p></transcript>"#;
    assert!(matches!(TimedTextParser::parse(xml), Err(ParseError::Malformed(_))));
}

/// Test that empty input has no document structure
#[test]
fn test_parse_withEmptyInput_shouldFail() {
    assert!(TimedTextParser::parse("").is_err());
    assert!(TimedTextParser::parse("just some text").is_err());
}

/// Test that a missing duration is reported, not skipped
#[test]
fn test_parse_withMissingDuration_shouldFailWithInvalidNumericField() {
    let xml = r#"<transcript><text start="1" dur="1">ok</text><text start="2">bad</text></transcript>"#;
    let err = TimedTextParser::parse(xml).unwrap_err();

    assert_eq!(
        err,
        ParseError::InvalidNumericField { index: 1, attribute: "dur", value: None }
    );
    assert!(err.to_string().contains("invalid numeric field"));
}

/// Test that non-numeric timings are rejected
#[test]
fn test_parse_withNonNumericStart_shouldFailWithInvalidNumericField() {
    let xml = common::timed_text(&[("abc", "1", "x")]);
    let err = TimedTextParser::parse(&xml).unwrap_err();

    match err {
        ParseError::InvalidNumericField { attribute, value, .. } => {
            assert_eq!(attribute, "start");
            assert_eq!(value.as_deref(), Some("abc"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
