/*!
 * # VocaSub - Text-to-Speech to Subtitle pipeline
 *
 * A Rust toolkit that synthesizes speech from text, transcribes the audio
 * back, and formats the timed transcript as SRT subtitles.
 *
 * ## Features
 *
 * - Speech synthesis through the OpenAI text-to-speech API
 * - Transcription with timestamps through the Speechall speech-to-text API
 * - Conversion of timed transcript segments into SRT or plain text
 * - Configurable voices, transcription models, and languages
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_formatter`: Segment-to-subtitle conversion (the core transform)
 * - `app_controller`: Main application controller running the pipeline
 * - `providers`: Client implementations for the speech services:
 *   - `providers::openai`: OpenAI TTS client
 *   - `providers::speechall`: Speechall STT client
 *   - `providers::mock`: Mock providers for testing
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod subtitle_formatter;

// Re-export main types for easier usage
pub use app_config::{Config, OutputFormat, TranscriptionModel, Voice};
pub use app_controller::Controller;
pub use errors::{AppError, ProviderError, SubtitleError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part1};
pub use providers::{SttProvider, Transcription, TtsProvider};
pub use subtitle_formatter::{Segment, SubtitleEntry, SubtitleTrack};
