use std::time::Duration;
use serde::Serialize;
use async_trait::async_trait;
use reqwest::Client;
use log::error;

use crate::errors::ProviderError;
use crate::providers::{SpeechAudio, SpeechRequest, TtsProvider};

/// OpenAI client for the text-to-speech API
#[derive(Debug)]
pub struct OpenAiTts {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
}

/// Wire format of the synthesis request body
#[derive(Debug, Serialize)]
struct SpeechBody<'a> {
    /// The model to use
    model: &'a str,
    /// The text to speak
    input: &'a str,
    /// Voice identifier
    voice: &'a str,
    /// Audio container format
    response_format: &'a str,
    /// Playback speed multiplier
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f32>,
}

impl OpenAiTts {
    /// Create a new client with the default request timeout
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_timeout(api_key, endpoint, Duration::from_secs(120))
    }

    /// Create a new client with an explicit request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Resolve a relative API path against the configured endpoint
    fn api_url(&self, path: &str) -> String {
        if self.endpoint.is_empty() {
            format!("https://api.openai.com/v1/{}", path)
        } else {
            format!("{}/{}", self.endpoint.trim_end_matches('/'), path)
        }
    }

    /// Map a non-success HTTP response to a provider error
    async fn error_from_response(
        response: reqwest::Response,
        voice: &str,
    ) -> ProviderError {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        error!("OpenAI TTS API error ({}): {}", status, error_text);

        match status.as_u16() {
            401 | 403 => ProviderError::AuthenticationError(error_text),
            429 => ProviderError::QuotaExceeded(error_text),
            400 | 404 if error_text.to_lowercase().contains("voice") => {
                ProviderError::UnsupportedVoice(voice.to_string())
            }
            _ => ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            },
        }
    }
}

#[async_trait]
impl TtsProvider for OpenAiTts {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio, ProviderError> {
        let body = SpeechBody {
            model: &request.model,
            input: &request.input,
            voice: request.voice.as_str(),
            response_format: &request.response_format,
            speed: request.speed,
        };

        let response = self
            .client
            .post(self.api_url("audio/speech"))
            .bearer_auth(&self.api_key)
            .json(&body)
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
            return Err(Self::error_from_response(response, request.voice.as_str()).await);
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(SpeechAudio {
            audio,
            format: request.response_format,
        })
    }

    /// Probe the API with the lightweight model listing endpoint
    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(self.api_url("models"))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "").await);
        }

        Ok(())
    }
}
