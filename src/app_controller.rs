use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::{Config, OutputFormat};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::openai::OpenAiTts;
use crate::providers::speechall::Speechall;
use crate::providers::{
    SpeechAudio, SpeechRequest, SttProvider, TranscriptionRequest, TtsProvider,
};
use crate::subtitle_formatter::SubtitleTrack;

// @module: Application controller for the speech-to-subtitle pipeline

/// Outcome of a pipeline run
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Path of the written subtitle document
    pub subtitle_file: PathBuf,
    /// Path of the intermediate audio, when kept
    pub audio_file: Option<PathBuf>,
    /// Number of subtitle entries produced
    pub entry_count: usize,
}

/// Main application controller wiring the TTS and STT providers to the
/// subtitle formatter. The two API calls run sequentially; the formatter is
/// a pure transform at the end.
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Text-to-speech provider
    tts: Arc<dyn TtsProvider>,
    // @field: Speech-to-text provider
    stt: Arc<dyn SttProvider>,
}

impl Controller {
    // @method: Create a controller with real providers from the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let tts = Arc::new(OpenAiTts::with_timeout(
            config.tts.resolve_api_key(),
            config.tts.endpoint.clone(),
            Duration::from_secs(config.tts.timeout_secs),
        ));
        let stt = Arc::new(Speechall::with_timeout(
            config.stt.resolve_api_key(),
            config.stt.endpoint.clone(),
            Duration::from_secs(config.stt.timeout_secs),
        ));

        Ok(Self { config, tts, stt })
    }

    /// Create a controller with injected providers, used by tests
    pub fn with_providers(
        config: Config,
        tts: Arc<dyn TtsProvider>,
        stt: Arc<dyn SttProvider>,
    ) -> Self {
        Self { config, tts, stt }
    }

    /// Run the full pipeline: synthesize the text, transcribe the audio back,
    /// and write the subtitle document next to the requested output stem.
    pub async fn run(
        &self,
        text: &str,
        output_dir: &Path,
        output_stem: &str,
        force_overwrite: bool,
        keep_audio: bool,
    ) -> Result<PipelineOutcome> {
        if text.trim().is_empty() {
            return Err(anyhow!("Input text is empty, nothing to synthesize"));
        }

        let start_time = std::time::Instant::now();
        FileManager::ensure_dir(output_dir)?;

        let subtitle_path = FileManager::generate_output_path(
            output_stem,
            output_dir,
            &self.language_code()?,
            self.config.output_format.extension(),
        );
        if FileManager::file_exists(&subtitle_path) && !force_overwrite {
            return Err(anyhow!(
                "Output file already exists: {:?}. Use -f to force overwrite.",
                subtitle_path
            ));
        }

        // Step 1: text to speech
        let audio = self.synthesize_step(text).await?;

        let audio_file = if keep_audio {
            let audio_path = output_dir.join(format!("{}.{}", output_stem, audio.format));
            FileManager::write_bytes(&audio_path, &audio.audio)?;
            info!("Audio written to {:?}", audio_path);
            Some(audio_path)
        } else {
            None
        };

        // Step 2: speech back to timed text
        let track = self.transcribe_step(audio.audio).await?;

        // Step 3: serialize and write
        let content = match self.config.output_format {
            OutputFormat::Srt => track.to_srt(),
            OutputFormat::Text => track.to_plain_text(),
        };
        FileManager::write_text(&subtitle_path, &content)?;

        info!(
            "Subtitle file written to {:?} ({} entries, {:.1}s elapsed)",
            subtitle_path,
            track.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(PipelineOutcome {
            subtitle_file: subtitle_path,
            audio_file,
            entry_count: track.len(),
        })
    }

    /// Transcribe an existing audio file without the synthesis step
    pub async fn transcribe_file(
        &self,
        audio_path: &Path,
        force_overwrite: bool,
    ) -> Result<PipelineOutcome> {
        if !FileManager::file_exists(audio_path) {
            return Err(anyhow!("Audio file does not exist: {:?}", audio_path));
        }

        let output_dir = audio_path.parent().unwrap_or(Path::new(".")).to_path_buf();
        let stem = audio_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "transcript".to_string());

        let subtitle_path = FileManager::generate_output_path(
            &stem,
            &output_dir,
            &self.language_code()?,
            self.config.output_format.extension(),
        );
        if FileManager::file_exists(&subtitle_path) && !force_overwrite {
            return Err(anyhow!(
                "Output file already exists: {:?}. Use -f to force overwrite.",
                subtitle_path
            ));
        }

        let audio = FileManager::read_bytes(audio_path)?;
        let track = self.transcribe_step(audio.into()).await?;

        let content = match self.config.output_format {
            OutputFormat::Srt => track.to_srt(),
            OutputFormat::Text => track.to_plain_text(),
        };
        FileManager::write_text(&subtitle_path, &content)?;

        info!(
            "Subtitle file written to {:?} ({} entries)",
            subtitle_path,
            track.len()
        );

        Ok(PipelineOutcome {
            subtitle_file: subtitle_path,
            audio_file: None,
            entry_count: track.len(),
        })
    }

    /// Synthesize speech for the given text with spinner progress
    async fn synthesize_step(&self, text: &str) -> Result<SpeechAudio> {
        let spinner = step_spinner(format!(
            "Synthesizing speech ({} chars, voice {})",
            text.len(),
            self.config.tts.voice
        ));

        let mut request = SpeechRequest::new(self.config.tts.model.clone(), text)
            .voice(self.config.tts.voice)
            .response_format(self.config.tts.response_format.clone());
        if let Some(speed) = self.config.tts.speed {
            request = request.speed(speed);
        }

        let audio = self
            .tts
            .synthesize(request)
            .await
            .context("Text-to-speech request failed")?;

        spinner.finish_and_clear();

        if audio.audio.is_empty() {
            warn!("TTS provider returned empty audio");
        }
        debug!("Received {} bytes of {} audio", audio.audio.len(), audio.format);

        Ok(audio)
    }

    /// Language code in the ISO 639-1 form the transcription API expects
    fn language_code(&self) -> Result<String> {
        language_utils::normalize_to_part1(&self.config.stt.language)
    }

    /// Transcribe audio bytes and format the segments into a subtitle track
    async fn transcribe_step(&self, audio: bytes::Bytes) -> Result<SubtitleTrack> {
        let language = self.language_code()?;
        let spinner = step_spinner(format!(
            "Transcribing {} audio with {}",
            language_utils::get_language_name(&language)?,
            self.config.stt.model
        ));

        let request = TranscriptionRequest::new(audio, self.config.stt.model)
            .language(language)
            .punctuation(self.config.stt.punctuation)
            .diarization(self.config.stt.diarization)
            .vocabulary(self.config.stt.vocabulary.clone());

        let transcription = self
            .stt
            .transcribe(request)
            .await
            .context("Speech-to-text request failed")?;

        spinner.finish_and_clear();

        if transcription.segments.is_empty() {
            warn!("Transcription contains no timed segments");
        }

        // A malformed segment here is surfaced verbatim, not clamped
        let track = SubtitleTrack::format(&transcription.segments)?;
        Ok(track)
    }
}

/// Spinner used for the sequential pipeline steps
fn step_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
