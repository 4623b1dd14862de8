/*!
 * Tests for error types and conversions
 */

use vocasub::errors::{AppError, ProviderError, SubtitleError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_unsupportedVoice_shouldNameTheVoice() {
    let error = ProviderError::UnsupportedVoice("whisperwind".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Unsupported voice"));
    assert!(display.contains("whisperwind"));
}

#[test]
fn test_providerError_unsupportedModel_shouldNameTheModel() {
    let error = ProviderError::UnsupportedModel("vendor.unknown".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Unsupported model"));
    assert!(display.contains("vendor.unknown"));
}

#[test]
fn test_providerError_quotaExceeded_shouldDisplayCorrectly() {
    let error = ProviderError::QuotaExceeded("Monthly minutes exhausted".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Quota exceeded"));
    assert!(display.contains("Monthly minutes exhausted"));
}

#[test]
fn test_subtitleError_invalidTimeRange_shouldCarryIndexAndTimes() {
    let error = SubtitleError::InvalidTimeRange {
        index: 7,
        start: 12.5,
        end: 3.0,
    };
    let display = format!("{}", error);
    assert!(display.contains("segment 7"));
    assert!(display.contains("12.5"));
    assert!(display.contains("3"));
}

#[test]
fn test_subtitleError_invalidTimestamp_shouldDisplayInput() {
    let error = SubtitleError::InvalidTimestamp("99:99".to_string());
    assert!(format!("{}", error).contains("99:99"));
}

#[test]
fn test_appError_fromProviderError_shouldWrap() {
    let provider_error = ProviderError::AuthenticationError("Bad token".to_string());
    let app_error: AppError = provider_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Provider error"));
    assert!(display.contains("Bad token"));
}

#[test]
fn test_appError_fromSubtitleError_shouldWrap() {
    let subtitle_error = SubtitleError::NonFiniteTime { index: 3 };
    let app_error: AppError = subtitle_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Subtitle error"));
    assert!(display.contains("segment 3"));
}

#[test]
fn test_appError_fromIoError_shouldMapToFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.mp3");
    let app_error: AppError = io_error.into();
    assert!(format!("{}", app_error).contains("File error"));
}
