use std::time::Duration;
use serde::Deserialize;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use log::{debug, error};

use crate::errors::ProviderError;
use crate::providers::{SttProvider, Transcription, TranscriptionRequest, WordTiming};
use crate::subtitle_formatter::Segment;

/// Speechall client for the speech-to-text API
#[derive(Debug)]
pub struct Speechall {
    /// HTTP client for API requests
    client: Client,
    /// Bearer token for authentication
    api_token: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
}

/// Wire format of a transcript segment
#[derive(Debug, Deserialize)]
struct WireSegment {
    /// Start of the segment in seconds
    start: f64,
    /// End of the segment in seconds
    end: f64,
    /// Transcribed text of the segment
    text: String,
    /// Speaker label, present when diarization was requested
    #[serde(default)]
    speaker: Option<String>,
}

/// Wire format of a single word timing
#[derive(Debug, Deserialize)]
struct WireWord {
    start: f64,
    end: f64,
    word: String,
}

/// Wire format of the transcription response
#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    /// Full transcript text
    #[serde(default)]
    text: String,
    /// Detected language, when reported
    #[serde(default)]
    language: Option<String>,
    /// Timed segments
    #[serde(default)]
    segments: Vec<WireSegment>,
    /// Per-word timestamps, when reported
    #[serde(default)]
    words: Option<Vec<WireWord>>,
}

impl Speechall {
    /// Create a new client with the default request timeout
    pub fn new(api_token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_timeout(api_token, endpoint, Duration::from_secs(120))
    }

    /// Create a new client with an explicit request timeout
    pub fn with_timeout(
        api_token: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_token: api_token.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Resolve a relative API path against the configured endpoint
    fn api_url(&self, path: &str) -> String {
        if self.endpoint.is_empty() {
            format!("https://api.speechall.com/v1/{}", path)
        } else {
            format!("{}/{}", self.endpoint.trim_end_matches('/'), path)
        }
    }

    /// Map a non-success HTTP response to a provider error
    async fn error_from_response(
        response: reqwest::Response,
        model: &str,
    ) -> ProviderError {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        error!("Speechall API error ({}): {}", status, error_text);

        match status.as_u16() {
            401 | 403 => ProviderError::AuthenticationError(error_text),
            402 | 429 => ProviderError::QuotaExceeded(error_text),
            404 | 422 if error_text.to_lowercase().contains("model") => {
                ProviderError::UnsupportedModel(model.to_string())
            }
            _ => ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            },
        }
    }

    /// Convert the wire response into the provider-agnostic transcript
    ///
    /// Speaker labels, when present, are folded into the caption text so the
    /// downstream subtitle keeps the diarization visible.
    fn into_transcription(response: TranscribeResponse) -> Transcription {
        let segments = response
            .segments
            .into_iter()
            .map(|s| {
                let text = match s.speaker {
                    Some(speaker) if !speaker.is_empty() => format!("[{}] {}", speaker, s.text),
                    _ => s.text,
                };
                Segment::new(s.start, s.end, text)
            })
            .collect();

        let words = response.words.map(|words| {
            words
                .into_iter()
                .map(|w| WordTiming {
                    start_seconds: w.start,
                    end_seconds: w.end,
                    word: w.word,
                })
                .collect()
        });

        Transcription {
            text: response.text,
            language: response.language,
            segments,
            words,
        }
    }
}

#[async_trait]
impl SttProvider for Speechall {
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<Transcription, ProviderError> {
        let model = request.model.as_str();

        let mut query: Vec<(&str, String)> = vec![
            ("model", model.to_string()),
            ("output_format", "json".to_string()),
            ("punctuation", request.punctuation.to_string()),
        ];
        if let Some(language) = &request.language {
            query.push(("language", language.clone()));
        }
        if request.diarization {
            query.push(("diarization", "true".to_string()));
        }
        if !request.vocabulary.is_empty() {
            query.push(("vocabulary", request.vocabulary.join(",")));
        }

        debug!(
            "Transcribing {} bytes of audio with model {}",
            request.audio.len(),
            model
        );

        let response = self
            .client
            .post(self.api_url("transcribe"))
            .query(&query)
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(request.audio)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, model).await);
        }

        let transcribe_response = response
            .json::<TranscribeResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(Self::into_transcription(transcribe_response))
    }
}
