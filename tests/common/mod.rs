/*!
 * Common test utilities for the subgrab test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample timed-text document with three cues
pub const SAMPLE_TIMED_TEXT: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<transcript>
<text start="0.5" dur="2.1">Hello &amp; welcome</text>
<text start="2.6" dur="3">to the show</text>
<text start="3661.5" dur="1.25">see you</text>
</transcript>"#;

/// Builds a timed-text document from (start, dur, text) triples
pub fn timed_text(cues: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from("<transcript>");
    for (start, dur, text) in cues {
        xml.push_str(&format!(r#"<text start="{}" dur="{}">{}</text>"#, start, dur, text));
    }
    xml.push_str("</transcript>");
    xml
}

/// Creates a sample timed-text file for testing
pub fn create_test_timed_text(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_TIMED_TEXT)
}
