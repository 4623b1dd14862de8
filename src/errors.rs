/*!
 * Error types for the vocasub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Error when the account quota or rate limit is exhausted
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Error when the requested voice is not offered by the TTS service
    #[error("Unsupported voice: {0}")]
    UnsupportedVoice(String),

    /// Error when the requested transcription model is not offered by the STT service
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),
}

/// Errors that can occur during subtitle formatting
///
/// A malformed segment is a defect in the upstream transcription provider;
/// the formatter fails fast instead of clamping so those defects stay visible.
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A segment's end time precedes its start time
    #[error("segment {index}: end time {end}s precedes start time {start}s")]
    InvalidTimeRange {
        /// 1-based index of the offending segment
        index: usize,
        /// Start time in seconds
        start: f64,
        /// End time in seconds
        end: f64,
    },

    /// A segment starts before zero
    #[error("segment {index}: negative start time {start}s")]
    NegativeStart {
        /// 1-based index of the offending segment
        index: usize,
        /// Start time in seconds
        start: f64,
    },

    /// A segment carries a NaN or infinite timestamp
    #[error("segment {index}: non-finite timestamp")]
    NonFiniteTime {
        /// 1-based index of the offending segment
        index: usize,
    },

    /// An SRT timestamp string could not be parsed
    #[error("invalid SRT timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from subtitle formatting
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error in the application configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
