use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use once_cell::sync::Lazy;
use regex::Regex;

// @module: File naming and file system utilities

// @const: Characters that are not allowed in a file name on common platforms
static FORBIDDEN_CHARS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[<>:"/\\|?*]"#).unwrap()
});

// @struct: Inputs of an output file name
#[derive(Debug, Clone, PartialEq)]
pub struct NamingContext {
    // @field: Video title as shown on the page
    pub video_title: String,

    // @field: Display name of the caption language
    pub language_name: String,

    // @field: Machine generated captions
    pub is_auto_generated: bool,

    // @field: Extension without the dot (srt or txt)
    pub extension: String,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @replaces: Each forbidden character with '_', one for one
    pub fn sanitize_title(title: &str) -> String {
        FORBIDDEN_CHARS_REGEX.replace_all(title, "_").into_owned()
    }

    // @checks: Any forbidden character present
    pub fn has_forbidden_chars(value: &str) -> bool {
        FORBIDDEN_CHARS_REGEX.is_match(value)
    }

    /// Use `fallback` when the title is missing or blank
    pub fn title_or_fallback(title: Option<&str>, fallback: &str) -> String {
        match title {
            Some(title) if !title.trim().is_empty() => title.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Build the output file name for a caption track.
    ///
    /// `<sanitized title>(<language>).<ext>` for manual tracks and
    /// `<sanitized title>(<language>-<marker>).<ext>` for auto-generated ones.
    /// Identical inputs always give identical names.
    pub fn build_file_name(context: &NamingContext, auto_generated_marker: &str) -> String {
        let clean_title = Self::sanitize_title(&context.video_title);

        let language_suffix = if context.is_auto_generated {
            format!("({}-{})", context.language_name, auto_generated_marker)
        } else {
            format!("({})", context.language_name)
        };

        format!("{}{}.{}", clean_title, language_suffix, context.extension)
    }

    // @generates: Output path inside output_dir
    pub fn generate_output_path<P: AsRef<Path>>(output_dir: P, file_name: &str) -> PathBuf {
        output_dir.as_ref().join(file_name)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
