// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, LogLevel, OutputFormat, TranscriptionModel, Voice};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod language_utils;
mod providers;
mod subtitle_formatter;

/// CLI Wrapper for Voice to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliVoice {
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl From<CliVoice> for Voice {
    fn from(cli_voice: CliVoice) -> Self {
        match cli_voice {
            CliVoice::Alloy => Voice::Alloy,
            CliVoice::Echo => Voice::Echo,
            CliVoice::Fable => Voice::Fable,
            CliVoice::Onyx => Voice::Onyx,
            CliVoice::Nova => Voice::Nova,
            CliVoice::Shimmer => Voice::Shimmer,
        }
    }
}

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOutputFormat {
    Srt,
    Text,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Srt => OutputFormat::Srt,
            CliOutputFormat::Text => OutputFormat::Text,
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

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full text-to-speech-to-subtitle pipeline (default command)
    #[command(alias = "pipeline")]
    Run(RunArgs),

    /// Transcribe an existing audio file to subtitles
    Transcribe(TranscribeArgs),

    /// Generate shell completions for vocasub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Text to synthesize, or a path to a text file when --from-file is set
    #[arg(value_name = "TEXT")]
    text: String,

    /// Treat TEXT as a path to a UTF-8 text file
    #[arg(long)]
    from_file: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Voice to synthesize with
    #[arg(short, long, value_enum)]
    voice: Option<CliVoice>,

    /// Transcription model identifier (e.g. 'assemblyai.best')
    #[arg(short = 'm', long)]
    transcription_model: Option<String>,

    /// Expected language of the audio (ISO 639 code, e.g. 'en')
    #[arg(short, long)]
    language: Option<String>,

    /// Directory for the generated files (defaults to the current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Subtitle output format
    #[arg(long, value_enum)]
    output_format: Option<CliOutputFormat>,

    /// Keep the intermediate audio file next to the subtitles
    #[arg(short, long)]
    keep_audio: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct TranscribeArgs {
    /// Audio file to transcribe
    #[arg(value_name = "AUDIO_PATH")]
    audio_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Transcription model identifier (e.g. 'assemblyai.best')
    #[arg(short = 'm', long)]
    transcription_model: Option<String>,

    /// Expected language of the audio (ISO 639 code, e.g. 'en')
    #[arg(short, long)]
    language: Option<String>,

    /// Subtitle output format
    #[arg(long, value_enum)]
    output_format: Option<CliOutputFormat>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// VocaSub - Text-to-Speech to Subtitle pipeline
///
/// Synthesizes speech from text with the OpenAI TTS API, transcribes the
/// audio back with the Speechall STT API, and writes SRT subtitles.
#[derive(Parser, Debug)]
#[command(name = "vocasub")]
#[command(version = "0.1.0")]
#[command(about = "Text-to-speech to subtitle pipeline")]
#[command(long_about = "VocaSub synthesizes speech from text and turns the transcription back into subtitles.

EXAMPLES:
    vocasub \"Hello world!\"                       # Full pipeline with defaults
    vocasub -v nova \"Hello world!\"               # Pick a voice
    vocasub -m deepgram.nova-2 \"Hello world!\"    # Pick a transcription model
    vocasub --from-file script.txt --keep-audio  # Synthesize a text file, keep the mp3
    vocasub transcribe recording.mp3             # Transcribe existing audio only
    vocasub completions bash > vocasub.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

    API credentials are read from the config file or from the environment:
    OPENAI_API_KEY for synthesis, SPEECHALL_API_TOKEN for transcription.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text to synthesize, or a path to a text file when --from-file is set
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Treat TEXT as a path to a UTF-8 text file
    #[arg(long)]
    from_file: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Voice to synthesize with
    #[arg(short, long, value_enum)]
    voice: Option<CliVoice>,

    /// Transcription model identifier (e.g. 'assemblyai.best')
    #[arg(short = 'm', long)]
    transcription_model: Option<String>,

    /// Expected language of the audio (ISO 639 code, e.g. 'en')
    #[arg(short, long)]
    language: Option<String>,

    /// Directory for the generated files (defaults to the current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Subtitle output format
    #[arg(long, value_enum)]
    output_format: Option<CliOutputFormat>,

    /// Keep the intermediate audio file next to the subtitles
    #[arg(short, long)]
    keep_audio: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
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

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Map a config log level to the log crate's filter
fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "vocasub", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Run(args)) => run_pipeline(args).await,
        Some(Commands::Transcribe(args)) => run_transcribe(args).await,
        None => {
            // Default behavior - use top-level args for a bare invocation
            let text = cli
                .text
                .ok_or_else(|| anyhow!("TEXT is required when no subcommand is specified"))?;

            let run_args = RunArgs {
                text,
                from_file: cli.from_file,
                force_overwrite: cli.force_overwrite,
                voice: cli.voice,
                transcription_model: cli.transcription_model,
                language: cli.language,
                output_dir: cli.output_dir,
                output_format: cli.output_format,
                keep_audio: cli.keep_audio,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_pipeline(run_args).await
        }
    }
}

/// Load the configuration file, creating a default one when missing,
/// then apply CLI overrides and validate.
fn load_config(
    config_path: &str,
    log_level: &Option<CliLogLevel>,
    voice: &Option<CliVoice>,
    transcription_model: &Option<String>,
    language: &Option<String>,
    output_format: &Option<CliOutputFormat>,
) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = log_level {
        let config_log_level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader::<_, Config>(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(cli_voice) = voice {
        config.tts.voice = cli_voice.clone().into();
    }
    if let Some(model) = transcription_model {
        config.stt.model = TranscriptionModel::from_str(model)?;
    }
    if let Some(language) = language {
        config.stt.language = language.clone();
    }
    if let Some(format) = output_format {
        config.output_format = format.clone().into();
    }
    if let Some(level) = log_level {
        config.log_level = level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    Ok(config)
}

async fn run_pipeline(options: RunArgs) -> Result<()> {
    let config = load_config(
        &options.config_path,
        &options.log_level,
        &options.voice,
        &options.transcription_model,
        &options.language,
        &options.output_format,
    )?;

    // Resolve the input text and the output file stem
    let (text, output_stem) = if options.from_file {
        let path = PathBuf::from(&options.text);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "speech".to_string());
        (file_utils::FileManager::read_text(&path)?, stem)
    } else {
        (options.text.clone(), "speech".to_string())
    };

    let output_dir = options
        .output_dir
        .unwrap_or_else(|| PathBuf::from("."));

    let controller = Controller::with_config(config)?;
    controller
        .run(
            &text,
            &output_dir,
            &output_stem,
            options.force_overwrite,
            options.keep_audio,
        )
        .await?;

    Ok(())
}

async fn run_transcribe(options: TranscribeArgs) -> Result<()> {
    let config = load_config(
        &options.config_path,
        &options.log_level,
        &None,
        &options.transcription_model,
        &options.language,
        &options.output_format,
    )?;

    let controller = Controller::with_config(config)?;
    controller
        .transcribe_file(&options.audio_path, options.force_overwrite)
        .await?;

    Ok(())
}
