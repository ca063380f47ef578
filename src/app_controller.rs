use anyhow::{anyhow, Context, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Component, Path, PathBuf};

use crate::app_config::{Config, ManifestEntry, TrackManifest};
use crate::file_utils::FileManager;
use crate::subtitle_processor::{CaptionDocument, CaptionTrack, FormatConverter, SubtitleFormat};

// @module: Application controller for caption conversion

/// One conversion: a local timed-text document and the track it belongs to
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    // @field: Path of the timed-text XML
    pub source: PathBuf,

    // @field: Track the document was fetched for
    pub track: CaptionTrack,

    // @field: Video title, fallback title when None or blank
    pub video_title: Option<String>,

    // @field: Output format
    pub format: SubtitleFormat,
}

/// What happened to a single output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// File written
    Written(PathBuf),
    /// File already existed and overwriting was not requested
    Skipped(PathBuf),
}

/// Result of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    /// (track language, error message)
    pub failed: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Main application controller for caption conversion
#[derive(Debug, Clone)]
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert a timed-text file and return the rendered text without writing anything
    pub fn convert_to_string<P: AsRef<Path>>(&self, source: P, format: SubtitleFormat) -> Result<String> {
        let source = source.as_ref();
        let xml = FileManager::read_to_string(source)?;
        let output = FormatConverter::convert_xml(&xml, format)
            .with_context(|| format!("Failed to convert {:?}", source))?;

        debug!("Converted {:?} to {}", source, format.display_name());
        Ok(output)
    }

    /// Output file name a request would be written under
    pub fn output_file_name(&self, document: &CaptionDocument, request: &ConvertRequest) -> String {
        let title = FileManager::title_or_fallback(request.video_title.as_deref(), &self.config.fallback_title);
        document.file_name(&title, request.format, &self.config.auto_generated_marker)
    }

    /// Convert one request and write the result into `output_dir`
    pub fn convert_to_file<P: AsRef<Path>>(
        &self,
        request: &ConvertRequest,
        output_dir: P,
        force_overwrite: bool,
    ) -> Result<ConvertOutcome> {
        let output_dir = output_dir.as_ref();

        if !FileManager::file_exists(&request.source) {
            return Err(anyhow!("Input file does not exist: {:?}", request.source));
        }

        let xml = FileManager::read_to_string(&request.source)?;
        let document = CaptionDocument::from_xml(request.track.clone(), &xml)
            .with_context(|| format!("Failed to convert {:?}", request.source))?;

        let file_name = self.output_file_name(&document, request);

        // The name must stay a single entry inside output_dir
        let mut components = Path::new(&file_name).components();
        if !matches!((components.next(), components.next()), (Some(Component::Normal(_)), None)) {
            return Err(anyhow!(
                "Output file name for {} track is not a plain file name: {:?}",
                request.track.language_name,
                file_name
            ));
        }

        let output_path = FileManager::generate_output_path(output_dir, &file_name);

        if output_path.exists() && !force_overwrite {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_path);
            return Ok(ConvertOutcome::Skipped(output_path));
        }

        FileManager::ensure_dir(output_dir)?;
        FileManager::write_to_file(&output_path, &document.render(request.format))?;

        info!("Success: {:?}", output_path);
        Ok(ConvertOutcome::Written(output_path))
    }

    /// Convert every track of a manifest concurrently.
    ///
    /// A failing track is recorded in the summary and does not stop the others.
    pub async fn run_batch(
        &self,
        manifest: &TrackManifest,
        format: SubtitleFormat,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        if manifest.tracks.is_empty() {
            warn!("No caption tracks in manifest");
            return Ok(summary);
        }

        let progress_bar = ProgressBar::new(manifest.tracks.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} tracks ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);
        progress_bar.set_message(format!("Converting to {}", format.display_name()));

        let tasks = manifest.tracks.iter().cloned().map(|entry: ManifestEntry| {
            let controller = self.clone();
            let output_dir = output_dir.clone();
            let progress_bar = progress_bar.clone();
            let request = ConvertRequest {
                source: entry.source,
                track: entry.track,
                video_title: manifest.video_title.clone(),
                format,
            };

            tokio::task::spawn_blocking(move || {
                let result = controller.convert_to_file(&request, &output_dir, force_overwrite);
                progress_bar.inc(1);
                (request.track.language_name, result)
            })
        });

        for joined in join_all(tasks).await {
            let (language, result) = joined.context("Conversion task panicked")?;
            match result {
                Ok(ConvertOutcome::Written(path)) => summary.written.push(path),
                Ok(ConvertOutcome::Skipped(path)) => summary.skipped.push(path),
                Err(e) => {
                    error!("Failed to convert {} track: {:#}", language, e);
                    summary.failed.push((language, format!("{:#}", e)));
                }
            }
        }

        progress_bar.finish_with_message(format!(
            "{} written, {} skipped, {} failed",
            summary.written.len(),
            summary.skipped.len(),
            summary.failed.len()
        ));

        Ok(summary)
    }

    /// Human readable listing of the tracks, auto-generated first
    pub fn describe_tracks(tracks: &[CaptionTrack]) -> String {
        if tracks.is_empty() {
            return "No captions available for this video\n".to_string();
        }

        let (auto, manual) = CaptionTrack::split_by_origin(tracks);
        let mut listing = String::new();

        for (heading, group) in [("Auto-generated captions", auto), ("Manual captions", manual)] {
            if group.is_empty() {
                continue;
            }
            listing.push_str(&format!("{}:\n", heading));
            for track in group {
                listing.push_str(&format!("  {}\n", track.language_name));
            }
        }

        listing
    }
}
