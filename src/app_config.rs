use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Text-to-speech settings
    #[serde(default)]
    pub tts: TtsConfig,

    /// Speech-to-text settings
    #[serde(default)]
    pub stt: SttConfig,

    /// Subtitle output format
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Voice offered by the TTS service
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    // @returns: Lowercase voice identifier as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Shimmer => "shimmer",
        }
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Voice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "alloy" => Ok(Self::Alloy),
            "echo" => Ok(Self::Echo),
            "fable" => Ok(Self::Fable),
            "onyx" => Ok(Self::Onyx),
            "nova" => Ok(Self::Nova),
            "shimmer" => Ok(Self::Shimmer),
            _ => Err(anyhow!("Invalid voice: {}", s)),
        }
    }
}

/// Transcription model offered by the STT service
///
/// Identifiers are vendor-qualified, matching what the API expects.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub enum TranscriptionModel {
    #[default]
    #[serde(rename = "assemblyai.best")]
    AssemblyAiBest,
    #[serde(rename = "openai.whisper-1")]
    OpenAiWhisper1,
    #[serde(rename = "deepgram.nova-2")]
    DeepgramNova2,
}

impl TranscriptionModel {
    // @returns: Vendor-qualified model identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssemblyAiBest => "assemblyai.best",
            Self::OpenAiWhisper1 => "openai.whisper-1",
            Self::DeepgramNova2 => "deepgram.nova-2",
        }
    }
}

impl std::fmt::Display for TranscriptionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TranscriptionModel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "assemblyai.best" => Ok(Self::AssemblyAiBest),
            "openai.whisper-1" => Ok(Self::OpenAiWhisper1),
            "deepgram.nova-2" => Ok(Self::DeepgramNova2),
            _ => Err(anyhow!("Invalid transcription model: {}", s)),
        }
    }
}

/// Subtitle output format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// SubRip subtitle document
    #[default]
    Srt,
    /// Plain text, one caption per line
    Text,
}

impl OutputFormat {
    /// File extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Text => "txt",
        }
    }
}

/// Text-to-speech service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TtsConfig {
    /// Model name (e.g., "tts-1", "tts-1-hd")
    #[serde(default = "default_tts_model")]
    pub model: String,

    /// Voice to synthesize with
    #[serde(default)]
    pub voice: Voice,

    /// API key for the service; falls back to OPENAI_API_KEY when empty
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL (optional, for Azure OpenAI or self-hosted)
    #[serde(default = "default_tts_endpoint")]
    pub endpoint: String,

    /// Audio container requested from the service
    #[serde(default = "default_audio_format")]
    pub response_format: String,

    /// Playback speed multiplier (vendor accepts 0.25 to 4.0)
    #[serde(default)]
    pub speed: Option<f32>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            model: default_tts_model(),
            voice: Voice::default(),
            api_key: String::new(),
            endpoint: default_tts_endpoint(),
            response_format: default_audio_format(),
            speed: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TtsConfig {
    /// Get the API key, falling back to the OPENAI_API_KEY environment variable
    pub fn resolve_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var("OPENAI_API_KEY").unwrap_or_default()
    }
}

/// Speech-to-text service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SttConfig {
    /// Transcription model to use
    #[serde(default)]
    pub model: TranscriptionModel,

    /// Expected language of the audio (ISO 639 code)
    #[serde(default = "default_language")]
    pub language: String,

    /// API token for the service; falls back to SPEECHALL_API_TOKEN when empty
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL
    #[serde(default = "default_stt_endpoint")]
    pub endpoint: String,

    /// Whether the transcript should include punctuation
    #[serde(default = "default_true")]
    pub punctuation: bool,

    /// Whether to label segments with speaker identities
    #[serde(default)]
    pub diarization: bool,

    /// Domain vocabulary hints forwarded to the recognizer
    #[serde(default)]
    pub vocabulary: Vec<String>,

    /// Request timeout in seconds
    #[serde(default = "default_stt_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: TranscriptionModel::default(),
            language: default_language(),
            api_key: String::new(),
            endpoint: default_stt_endpoint(),
            punctuation: true,
            diarization: false,
            vocabulary: Vec::new(),
            timeout_secs: default_stt_timeout_secs(),
        }
    }
}

impl SttConfig {
    /// Get the API token, falling back to the SPEECHALL_API_TOKEN environment variable
    pub fn resolve_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var("SPEECHALL_API_TOKEN").unwrap_or_default()
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_tts_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_stt_endpoint() -> String {
    "https://api.speechall.com/v1".to_string()
}

fn default_audio_format() -> String {
    "mp3".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_stt_timeout_secs() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // The transcription API speaks ISO 639-1; reject codes it cannot express
        crate::language_utils::normalize_to_part1(&self.stt.language)?;

        if self.tts.resolve_api_key().is_empty() {
            return Err(anyhow!(
                "TTS API key is required: set tts.api_key in the config or the OPENAI_API_KEY environment variable"
            ));
        }

        if self.stt.resolve_api_key().is_empty() {
            return Err(anyhow!(
                "STT API token is required: set stt.api_key in the config or the SPEECHALL_API_TOKEN environment variable"
            ));
        }

        if self.tts.model.is_empty() {
            return Err(anyhow!("TTS model must not be empty"));
        }

        if let Some(speed) = self.tts.speed {
            if !(0.25..=4.0).contains(&speed) {
                return Err(anyhow!(
                    "TTS speed must be between 0.25 and 4.0, got {}",
                    speed
                ));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            tts: TtsConfig::default(),
            stt: SttConfig::default(),
            output_format: OutputFormat::default(),
            log_level: LogLevel::default(),
        }
    }
}
