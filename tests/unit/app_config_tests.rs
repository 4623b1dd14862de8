/*!
 * Tests for application configuration
 */

use std::str::FromStr;
use vocasub::app_config::{Config, OutputFormat, TranscriptionModel, Voice};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_shouldUseVendorDefaults() {
    let config = Config::default();

    assert_eq!(config.tts.model, "tts-1");
    assert_eq!(config.tts.voice, Voice::Alloy);
    assert_eq!(config.tts.endpoint, "https://api.openai.com/v1");
    assert_eq!(config.tts.response_format, "mp3");

    assert_eq!(config.stt.model, TranscriptionModel::AssemblyAiBest);
    assert_eq!(config.stt.language, "en");
    assert_eq!(config.stt.endpoint, "https://api.speechall.com/v1");
    assert!(config.stt.punctuation);
    assert!(!config.stt.diarization);
    assert!(config.stt.vocabulary.is_empty());

    assert_eq!(config.output_format, OutputFormat::Srt);
}

/// Test config serialization round-trip through JSON
#[test]
fn test_config_jsonRoundTrip_shouldPreserveValues() {
    let mut config = Config::default();
    config.tts.voice = Voice::Nova;
    config.stt.model = TranscriptionModel::DeepgramNova2;
    config.stt.diarization = true;
    config.output_format = OutputFormat::Text;

    let json = serde_json::to_string_pretty(&config).unwrap();
    // Closed enums serialize as their wire identifiers
    assert!(json.contains("\"nova\""));
    assert!(json.contains("\"deepgram.nova-2\""));

    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.tts.voice, Voice::Nova);
    assert_eq!(parsed.stt.model, TranscriptionModel::DeepgramNova2);
    assert!(parsed.stt.diarization);
    assert_eq!(parsed.output_format, OutputFormat::Text);
}

/// Test parsing a minimal config file relies on serde defaults
#[test]
fn test_config_parse_withMinimalJson_shouldFillDefaults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{ "tts": { "voice": "onyx" }, "stt": {} }"#,
    )
    .unwrap();

    let content = std::fs::read_to_string(path).unwrap();
    let config: Config = serde_json::from_str(&content).unwrap();

    assert_eq!(config.tts.voice, Voice::Onyx);
    assert_eq!(config.tts.model, "tts-1");
    assert_eq!(config.stt.model, TranscriptionModel::AssemblyAiBest);
}

/// Test voice parsing from strings
#[test]
fn test_voice_fromStr_withKnownNames_shouldParse() {
    assert_eq!(Voice::from_str("alloy").unwrap(), Voice::Alloy);
    assert_eq!(Voice::from_str("SHIMMER").unwrap(), Voice::Shimmer);
    assert!(Voice::from_str("bogus").is_err());
}

/// Test transcription model parsing from strings
#[test]
fn test_transcriptionModel_fromStr_withVendorIds_shouldParse() {
    assert_eq!(
        TranscriptionModel::from_str("assemblyai.best").unwrap(),
        TranscriptionModel::AssemblyAiBest
    );
    assert_eq!(
        TranscriptionModel::from_str("openai.whisper-1").unwrap(),
        TranscriptionModel::OpenAiWhisper1
    );
    assert!(TranscriptionModel::from_str("vendor.unknown").is_err());
}

/// Test display of the closed enums matches the wire identifiers
#[test]
fn test_enum_display_shouldMatchWireIdentifiers() {
    assert_eq!(Voice::Fable.to_string(), "fable");
    assert_eq!(TranscriptionModel::OpenAiWhisper1.to_string(), "openai.whisper-1");
    assert_eq!(OutputFormat::Srt.extension(), "srt");
    assert_eq!(OutputFormat::Text.extension(), "txt");
}

/// Test api key resolution prefers the config value
#[test]
fn test_resolve_api_key_withConfigValue_shouldIgnoreEnvironment() {
    let mut config = Config::default();
    config.tts.api_key = "sk-config".to_string();
    config.stt.api_key = "sa-config".to_string();

    assert_eq!(config.tts.resolve_api_key(), "sk-config");
    assert_eq!(config.stt.resolve_api_key(), "sa-config");
}

/// Test validation passes with keys present and a valid language
#[test]
fn test_validate_withKeysAndValidLanguage_shouldSucceed() {
    let mut config = Config::default();
    config.tts.api_key = "sk-test".to_string();
    config.stt.api_key = "sa-test".to_string();
    config.stt.language = "fr".to_string();

    assert!(config.validate().is_ok());
}

/// Test validation rejects an invalid language code
#[test]
fn test_validate_withInvalidLanguage_shouldFail() {
    let mut config = Config::default();
    config.tts.api_key = "sk-test".to_string();
    config.stt.api_key = "sa-test".to_string();
    config.stt.language = "xx".to_string();

    assert!(config.validate().is_err());
}

/// Test validation rejects a real language without a two-letter code
#[test]
fn test_validate_withLanguageLackingTwoLetterCode_shouldFail() {
    let mut config = Config::default();
    config.tts.api_key = "sk-test".to_string();
    config.stt.api_key = "sa-test".to_string();
    // Cantonese has a 639-3 code but no 639-1 form the API could accept
    config.stt.language = "yue".to_string();

    assert!(config.validate().is_err());
}

/// Test validation rejects a playback speed outside the vendor's range
#[test]
fn test_validate_withSpeedOutOfRange_shouldFail() {
    let mut config = Config::default();
    config.tts.api_key = "sk-test".to_string();
    config.stt.api_key = "sa-test".to_string();

    config.tts.speed = Some(1.5);
    assert!(config.validate().is_ok());

    config.tts.speed = Some(5.0);
    assert!(config.validate().is_err());

    config.tts.speed = Some(0.1);
    assert!(config.validate().is_err());
}
