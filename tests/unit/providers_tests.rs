/*!
 * Tests for the provider request types and mock providers
 */

use bytes::Bytes;
use vocasub::app_config::{TranscriptionModel, Voice};
use vocasub::errors::ProviderError;
use vocasub::providers::mock::{MockBehavior, MockSynthesizer, MockTranscriber};
use vocasub::providers::{
    SpeechRequest, SttProvider, TranscriptionRequest, TtsProvider,
};

#[test]
fn test_speech_request_builder_shouldApplyOptions() {
    let request = SpeechRequest::new("tts-1", "Hello world")
        .voice(Voice::Nova)
        .response_format("opus")
        .speed(1.25);

    assert_eq!(request.model, "tts-1");
    assert_eq!(request.input, "Hello world");
    assert_eq!(request.voice, Voice::Nova);
    assert_eq!(request.response_format, "opus");
    assert_eq!(request.speed, Some(1.25));
}

#[test]
fn test_speech_request_defaults_shouldUseAlloyMp3NoSpeed() {
    let request = SpeechRequest::new("tts-1", "hi");
    assert_eq!(request.voice, Voice::Alloy);
    assert_eq!(request.response_format, "mp3");
    assert_eq!(request.speed, None);
}

#[test]
fn test_transcription_request_builder_shouldApplyOptions() {
    let request = TranscriptionRequest::new(Bytes::from_static(b"audio"), TranscriptionModel::OpenAiWhisper1)
        .language("fr")
        .punctuation(false)
        .diarization(true)
        .vocabulary(vec!["vocasub".to_string()]);

    assert_eq!(request.model, TranscriptionModel::OpenAiWhisper1);
    assert_eq!(request.language.as_deref(), Some("fr"));
    assert!(!request.punctuation);
    assert!(request.diarization);
    assert_eq!(request.vocabulary, vec!["vocasub".to_string()]);
}

#[tokio::test]
async fn test_mock_synthesizer_working_shouldReturnTextProportionalAudio() {
    let synthesizer = MockSynthesizer::working();
    let audio = synthesizer
        .synthesize(SpeechRequest::new("tts-1", "abc"))
        .await
        .unwrap();

    assert_eq!(audio.audio.len(), 3 * 160);
    assert_eq!(audio.format, "mp3");
    assert_eq!(synthesizer.request_count(), 1);
}

#[tokio::test]
async fn test_mock_synthesizer_failing_shouldReturnApiError() {
    let synthesizer = MockSynthesizer::failing();
    let result = synthesizer
        .synthesize(SpeechRequest::new("tts-1", "abc"))
        .await;

    match result {
        Err(ProviderError::ApiError { status_code, .. }) => assert_eq!(status_code, 500),
        other => panic!("Expected ApiError, got {:?}", other),
    }
    assert!(synthesizer.test_connection().await.is_err());
}

#[tokio::test]
async fn test_mock_transcriber_working_shouldReturnCannedSegments() {
    let transcriber = MockTranscriber::working();
    let request =
        TranscriptionRequest::new(Bytes::from_static(b"audio"), TranscriptionModel::default())
            .language("en");
    let transcription = transcriber.transcribe(request).await.unwrap();

    assert_eq!(transcription.text, "Hello world");
    assert_eq!(transcription.language.as_deref(), Some("en"));
    assert_eq!(transcription.segments.len(), 2);
    assert_eq!(transcription.segments[0].text, "Hello");
    assert_eq!(transcription.segments[1].start_seconds, 1.5);
}

#[tokio::test]
async fn test_mock_transcriber_intermittent_shouldFailEveryThirdRequest() {
    let transcriber = MockTranscriber::intermittent(3);

    for i in 1..=6 {
        let request =
            TranscriptionRequest::new(Bytes::from_static(b"audio"), TranscriptionModel::default());
        let result = transcriber.transcribe(request).await;
        if i % 3 == 0 {
            assert!(result.is_err(), "Request {} should fail", i);
        } else {
            assert!(result.is_ok(), "Request {} should succeed", i);
        }
    }
    assert_eq!(transcriber.request_count(), 6);
}

#[tokio::test]
async fn test_mock_transcriber_empty_shouldReturnNoSegments() {
    let transcriber = MockTranscriber::empty();
    let request =
        TranscriptionRequest::new(Bytes::from_static(b"audio"), TranscriptionModel::default());
    let transcription = transcriber.transcribe(request).await.unwrap();

    assert!(transcription.text.is_empty());
    assert!(transcription.segments.is_empty());
}

#[tokio::test]
async fn test_mock_transcriber_withCustomSegments_shouldReturnThem() {
    use vocasub::subtitle_formatter::Segment;

    let transcriber = MockTranscriber::new(MockBehavior::Working)
        .with_segments(vec![Segment::new(0.0, 2.0, "Custom caption")]);
    let request =
        TranscriptionRequest::new(Bytes::from_static(b"audio"), TranscriptionModel::default());
    let transcription = transcriber.transcribe(request).await.unwrap();

    assert_eq!(transcription.text, "Custom caption");
    assert_eq!(transcription.segments.len(), 1);
}
