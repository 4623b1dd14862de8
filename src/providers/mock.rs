/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockSynthesizer::working()` / `MockTranscriber::working()` - Always succeed
 * - `MockTranscriber::intermittent(n)` - Fails every nth request
 * - `MockSynthesizer::failing()` / `MockTranscriber::failing()` - Always fail
 */

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{
    SpeechAudio, SpeechRequest, SttProvider, Transcription, TranscriptionRequest, TtsProvider,
};
use crate::subtitle_formatter::Segment;

/// Behavior mode for the mock providers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a canned result
    Working,
    /// Fails intermittently (every nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty result
    Empty,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock text-to-speech provider
#[derive(Debug)]
pub struct MockSynthesizer {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
}

impl MockSynthesizer {
    /// Create a new mock synthesizer with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Number of requests seen so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Deterministic fake audio derived from the input text
    fn fake_audio(text: &str) -> Bytes {
        // 160 bytes of audio per character keeps sizes text-proportional
        let mut audio = Vec::with_capacity(text.len() * 160);
        for (i, byte) in text.bytes().enumerate() {
            audio.extend(std::iter::repeat(byte.wrapping_add(i as u8)).take(160));
        }
        Bytes::from(audio)
    }
}

#[async_trait]
impl TtsProvider for MockSynthesizer {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(SpeechAudio {
                audio: Self::fake_audio(&request.input),
                format: request.response_format,
            }),

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && (count + 1) % fail_every == 0 {
                    Err(ProviderError::RequestFailed(
                        "Simulated intermittent synthesis failure".to_string(),
                    ))
                } else {
                    Ok(SpeechAudio {
                        audio: Self::fake_audio(&request.input),
                        format: request.response_format,
                    })
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated synthesis failure".to_string(),
            }),

            MockBehavior::Empty => Ok(SpeechAudio {
                audio: Bytes::new(),
                format: request.response_format,
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                Ok(SpeechAudio {
                    audio: Self::fake_audio(&request.input),
                    format: request.response_format,
                })
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Mock speech-to-text provider
#[derive(Debug)]
pub struct MockTranscriber {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Language of the most recent request, for wire-format assertions
    last_language: Mutex<Option<String>>,
    /// Canned segments returned by working transcriptions
    segments: Vec<Segment>,
}

impl MockTranscriber {
    /// Create a new mock transcriber with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            last_language: Mutex::new(None),
            segments: vec![
                Segment::new(0.0, 1.5, "Hello"),
                Segment::new(1.5, 3.25, "world"),
            ],
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns an empty transcript
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Replace the canned segments
    pub fn with_segments(mut self, segments: Vec<Segment>) -> Self {
        self.segments = segments;
        self
    }

    /// Number of requests seen so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Language carried by the most recent request, if any
    pub fn last_language(&self) -> Option<String> {
        self.last_language.lock().map(|l| l.clone()).unwrap_or(None)
    }

    fn transcription(&self, request: &TranscriptionRequest) -> Transcription {
        Transcription {
            text: self
                .segments
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            language: request.language.clone(),
            segments: self.segments.clone(),
            words: None,
        }
    }
}

#[async_trait]
impl SttProvider for MockTranscriber {
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<Transcription, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_language.lock() {
            *last = request.language.clone();
        }

        match self.behavior {
            MockBehavior::Working => Ok(self.transcription(&request)),

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && (count + 1) % fail_every == 0 {
                    Err(ProviderError::RequestFailed(
                        "Simulated intermittent transcription failure".to_string(),
                    ))
                } else {
                    Ok(self.transcription(&request))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated transcription failure".to_string(),
            }),

            MockBehavior::Empty => Ok(Transcription {
                language: request.language.clone(),
                ..Transcription::default()
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                Ok(self.transcription(&request))
            }
        }
    }
}
