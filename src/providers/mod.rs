/*!
 * Provider implementations for the speech services.
 *
 * This module contains client implementations for the two vendor APIs:
 * - OpenAI: text-to-speech synthesis
 * - Speechall: speech-to-text transcription
 */

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::Debug;

use crate::app_config::{TranscriptionModel, Voice};
use crate::errors::ProviderError;
use crate::subtitle_formatter::Segment;

/// Request for speech synthesis
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// The synthesis model to use
    pub model: String,
    /// The text to speak
    pub input: String,
    /// The voice to synthesize with
    pub voice: Voice,
    /// Audio container requested from the service
    pub response_format: String,
    /// Playback speed multiplier (vendor accepts 0.25 to 4.0)
    pub speed: Option<f32>,
}

impl SpeechRequest {
    /// Create a new synthesis request with the default voice and mp3 output
    pub fn new(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
            voice: Voice::default(),
            response_format: "mp3".to_string(),
            speed: None,
        }
    }

    /// Set the voice
    pub fn voice(mut self, voice: Voice) -> Self {
        self.voice = voice;
        self
    }

    /// Set the audio container format
    pub fn response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = format.into();
        self
    }

    /// Set the playback speed
    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }
}

/// Synthesized audio returned by a TTS provider
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    /// The raw audio bytes
    pub audio: Bytes,
    /// Container format of the audio (e.g. "mp3")
    pub format: String,
}

/// Request for audio transcription
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    /// The raw audio to transcribe
    pub audio: Bytes,
    /// Transcription model to use
    pub model: TranscriptionModel,
    /// Expected language of the audio (ISO 639-1)
    pub language: Option<String>,
    /// Whether the transcript should include punctuation
    pub punctuation: bool,
    /// Whether to label segments with speaker identities
    pub diarization: bool,
    /// Domain vocabulary hints forwarded to the recognizer
    pub vocabulary: Vec<String>,
}

impl TranscriptionRequest {
    /// Create a new transcription request with defaults matching the service
    pub fn new(audio: Bytes, model: TranscriptionModel) -> Self {
        Self {
            audio,
            model,
            language: None,
            punctuation: true,
            diarization: false,
            vocabulary: Vec::new(),
        }
    }

    /// Set the expected language
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Toggle punctuation
    pub fn punctuation(mut self, punctuation: bool) -> Self {
        self.punctuation = punctuation;
        self
    }

    /// Toggle speaker diarization
    pub fn diarization(mut self, diarization: bool) -> Self {
        self.diarization = diarization;
        self
    }

    /// Set vocabulary hints
    pub fn vocabulary(mut self, vocabulary: Vec<String>) -> Self {
        self.vocabulary = vocabulary;
        self
    }
}

/// A word with its own timing, when the provider reports that granularity
#[derive(Debug, Clone, PartialEq)]
pub struct WordTiming {
    /// Start of the word in seconds
    pub start_seconds: f64,
    /// End of the word in seconds
    pub end_seconds: f64,
    /// The word itself
    pub word: String,
}

/// Provider-agnostic transcription result
#[derive(Debug, Clone, Default)]
pub struct Transcription {
    /// Full transcript text
    pub text: String,
    /// Detected or requested language, when reported
    pub language: Option<String>,
    /// Timed segments in chronological order
    pub segments: Vec<Segment>,
    /// Per-word timestamps, when the provider reports them
    pub words: Option<Vec<WordTiming>>,
}

/// Common trait for text-to-speech providers
#[async_trait]
pub trait TtsProvider: Send + Sync + Debug {
    /// Synthesize speech from text
    ///
    /// # Arguments
    /// * `request` - The synthesis request
    ///
    /// # Returns
    /// * `Result<SpeechAudio, ProviderError>` - The audio or an error
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

/// Common trait for speech-to-text providers
#[async_trait]
pub trait SttProvider: Send + Sync + Debug {
    /// Transcribe audio into timed segments
    ///
    /// # Arguments
    /// * `request` - The transcription request
    ///
    /// # Returns
    /// * `Result<Transcription, ProviderError>` - The transcript or an error
    async fn transcribe(&self, request: TranscriptionRequest)
        -> Result<Transcription, ProviderError>;
}

pub mod mock;
pub mod openai;
pub mod speechall;
