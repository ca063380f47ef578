// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use subgrab::app_config::{self, Config, TrackManifest};
use subgrab::app_controller::{ConvertOutcome, ConvertRequest, Controller};
use subgrab::subtitle_processor::{CaptionTrack, SubtitleFormat};

/// CLI Wrapper for SubtitleFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSubtitleFormat {
    Srt,
    Txt,
}

impl From<CliSubtitleFormat> for SubtitleFormat {
    fn from(cli_format: CliSubtitleFormat) -> Self {
        match cli_format {
            CliSubtitleFormat::Srt => SubtitleFormat::Srt,
            CliSubtitleFormat::Txt => SubtitleFormat::Txt,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one timed-text XML file
    Convert(ConvertArgs),

    /// List the caption tracks of a manifest
    Tracks {
        /// Track manifest (JSON)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,
    },

    /// Convert every caption track of a manifest
    Batch(BatchArgs),

    /// Generate shell completions for subgrab
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Timed-text XML file
    #[arg(value_name = "XML_FILE")]
    input_path: PathBuf,

    /// Display name of the caption language (e.g. 'English')
    #[arg(short, long, required_unless_present = "stdout")]
    language: Option<String>,

    /// Video title used for the output file name
    #[arg(short = 'T', long)]
    title: Option<String>,

    /// The track was generated automatically
    #[arg(short, long)]
    auto_generated: bool,

    /// Output format
    #[arg(short = 'F', long, value_enum)]
    format: Option<CliSubtitleFormat>,

    /// Directory to write the output file to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the converted text instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Track manifest (JSON)
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,

    /// Output format
    #[arg(short = 'F', long, value_enum)]
    format: Option<CliSubtitleFormat>,

    /// Directory to write the output files to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

/// subgrab - caption track converter
///
/// Converts the timed-text XML captions of a video into SRT subtitles or a
/// plain transcript.
#[derive(Parser, Debug)]
#[command(name = "subgrab")]
#[command(version)]
#[command(about = "Convert timed-text captions to SRT or plain text")]
#[command(long_about = "subgrab converts timed-text XML caption tracks into SRT subtitles or flat transcripts.

EXAMPLES:
    subgrab convert en.xml -l English -T \"My video\"          # Write 'My video(English).srt'
    subgrab convert en.xml -l English -a -F txt             # Auto-generated track as transcript
    subgrab convert en.xml --stdout -F txt | pbcopy         # Print instead of writing
    subgrab tracks manifest.json                            # List tracks of a video
    subgrab batch manifest.json -o subs/                    # Convert every track
    subgrab completions bash > subgrab.bash                 # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short = 'L', long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and marker for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌"),
            Level::Warn => ("1;33", "🚧"),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍"),
            Level::Trace => ("1;35", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, marker) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger with the most verbose level it may ever need;
    // the effective level is set through log::set_max_level below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subgrab", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let (mut config, created) = Config::load_or_create(&cli.config_path)?;
    if created {
        warn!("Config file not found at '{}', created default config.", cli.config_path);
    }

    match &cli.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    match cli.command {
        Commands::Convert(args) => run_convert(config, args),
        Commands::Tracks { manifest } => run_tracks(manifest),
        Commands::Batch(args) => run_batch(config, args).await,
        Commands::Completions { .. } => Ok(()),
    }
}

fn run_convert(mut config: Config, args: ConvertArgs) -> Result<()> {
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.to_string_lossy().to_string();
    }
    let format = args.format.map(SubtitleFormat::from).unwrap_or(config.default_format);
    let controller = Controller::with_config(config)?;

    if args.stdout {
        let output = controller.convert_to_string(&args.input_path, format)?;
        let mut stdout = std::io::stdout();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    let language = args.language
        .ok_or_else(|| anyhow!("--language is required unless --stdout is given"))?;

    let request = ConvertRequest {
        source: args.input_path,
        track: CaptionTrack::new(language, "", args.auto_generated),
        video_title: args.title,
        format,
    };

    let output_dir = PathBuf::from(&controller.config().output_dir);
    if let ConvertOutcome::Skipped(path) = controller.convert_to_file(&request, output_dir, args.force_overwrite)? {
        info!("Left existing file untouched: {:?}", path);
    }

    Ok(())
}

fn run_tracks(manifest_path: PathBuf) -> Result<()> {
    let manifest = TrackManifest::from_file(&manifest_path)?;

    if let Some(title) = &manifest.video_title {
        println!("{}", title);
    }
    print!("{}", Controller::describe_tracks(&manifest.caption_tracks()));

    Ok(())
}

async fn run_batch(mut config: Config, args: BatchArgs) -> Result<()> {
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.to_string_lossy().to_string();
    }
    let format = args.format.map(SubtitleFormat::from).unwrap_or(config.default_format);
    let controller = Controller::with_config(config)?;

    let manifest = TrackManifest::from_file(&args.manifest)?;
    info!("Converting {} track(s) from {:?}", manifest.tracks.len(), args.manifest);

    let output_dir = PathBuf::from(&controller.config().output_dir);
    let summary = controller
        .run_batch(&manifest, format, output_dir, args.force_overwrite)
        .await?;

    info!(
        "Finished: {} written, {} skipped, {} failed",
        summary.written.len(),
        summary.skipped.len(),
        summary.failed.len()
    );

    if summary.has_failures() {
        return Err(anyhow!("{} track(s) failed to convert", summary.failed.len()));
    }

    Ok(())
}
