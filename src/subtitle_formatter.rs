use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use crate::errors::SubtitleError;

// @module: Subtitle formatting - transcript segments to SRT documents

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2,}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

/// A single timed span of transcribed speech, as delivered by the STT provider.
///
/// Segments arrive in chronological order and are treated as immutable input.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Start of the span in seconds from the beginning of the audio
    pub start_seconds: f64,

    /// End of the span in seconds, never before the start
    pub end_seconds: f64,

    /// Transcribed text, may contain embedded line breaks
    pub text: String,
}

impl Segment {
    pub fn new(start_seconds: f64, end_seconds: f64, text: impl Into<String>) -> Self {
        Segment {
            start_seconds,
            end_seconds,
            text: text.into(),
        }
    }
}

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number, 1-based
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
        let parts: Vec<&str> = timestamp.split(&[':', ','][..]).collect();

        if parts.len() != 4 {
            return Err(SubtitleError::InvalidTimestamp(timestamp.to_string()));
        }

        let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());
        let hours: u64 = parts[0].parse().map_err(|_| invalid())?;
        let minutes: u64 = parts[1].parse().map_err(|_| invalid())?;
        let seconds: u64 = parts[2].parse().map_err(|_| invalid())?;
        let millis: u64 = parts[3].parse().map_err(|_| invalid())?;

        // Minutes and seconds are capped at 59, milliseconds at 999
        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(invalid());
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    ///
    /// Hours are padded to at least two digits but grow past 99 unclipped.
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// An ordered subtitle document derived 1:1 from transcript segments.
#[derive(Debug, Default)]
pub struct SubtitleTrack {
    /// Entries in input order, indexed exactly 1..N
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleTrack {
    /// Build a subtitle track from an ordered sequence of segments.
    ///
    /// Entry indices are assigned 1..N in input order. Times are converted to
    /// whole milliseconds with round-half-up. A segment whose end precedes its
    /// start, starts before zero, or carries a non-finite time is a defect in
    /// the transcription source; this fails fast with the offending 1-based
    /// index and produces no partial output. An empty input yields an empty
    /// track. Empty segment text is passed through, not suppressed.
    pub fn format(segments: &[Segment]) -> Result<Self, SubtitleError> {
        let mut entries = Vec::with_capacity(segments.len());

        for (i, segment) in segments.iter().enumerate() {
            let index = i + 1;

            if !segment.start_seconds.is_finite() || !segment.end_seconds.is_finite() {
                return Err(SubtitleError::NonFiniteTime { index });
            }
            if segment.start_seconds < 0.0 {
                return Err(SubtitleError::NegativeStart {
                    index,
                    start: segment.start_seconds,
                });
            }
            if segment.end_seconds < segment.start_seconds {
                return Err(SubtitleError::InvalidTimeRange {
                    index,
                    start: segment.start_seconds,
                    end: segment.end_seconds,
                });
            }

            entries.push(SubtitleEntry::new(
                index,
                round_to_millis(segment.start_seconds),
                round_to_millis(segment.end_seconds),
                segment.text.clone(),
            ));
        }

        Ok(SubtitleTrack { entries })
    }

    /// Render the track as an SRT document.
    ///
    /// Each entry is its index, the timestamp range and the caption text,
    /// blank-line separated, with a trailing blank line after the last entry.
    /// An empty track renders as an empty string.
    pub fn to_srt(&self) -> String {
        let mut content = String::new();
        for entry in &self.entries {
            content.push_str(&entry.to_string());
        }
        content
    }

    /// Render the track as plain text, one caption per line
    pub fn to_plain_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parse SRT format text back into subtitle entries.
    ///
    /// Multi-line caption text is kept within a single entry; entries are
    /// returned in file order with their original sequence numbers.
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>, SubtitleError> {
        let mut entries = Vec::new();

        let mut current_seq: Option<usize> = None;
        let mut current_times: Option<(u64, u64)> = None;
        let mut current_text = String::new();
        let mut has_text = false;

        let mut flush = |seq: &mut Option<usize>,
                         times: &mut Option<(u64, u64)>,
                         text: &mut String,
                         has_text: &mut bool,
                         entries: &mut Vec<SubtitleEntry>| {
            if let (Some(seq_num), Some((start_ms, end_ms))) = (seq.take(), times.take()) {
                entries.push(SubtitleEntry::new(seq_num, start_ms, end_ms, text.clone()));
            }
            text.clear();
            *has_text = false;
        };

        for line in content.lines() {
            let trimmed = line.trim_end_matches('\r');

            // A blank line closes the entry in progress; an entry with no
            // text line so far is a legal empty caption
            if trimmed.trim().is_empty() {
                if current_times.is_some() {
                    flush(
                        &mut current_seq,
                        &mut current_times,
                        &mut current_text,
                        &mut has_text,
                        &mut entries,
                    );
                }
                continue;
            }

            if current_seq.is_none() && !has_text {
                if let Ok(num) = trimmed.trim().parse::<usize>() {
                    current_seq = Some(num);
                    continue;
                }
            }

            if current_seq.is_some() && current_times.is_none() {
                if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                    let start_ms = Self::capture_to_millis(&caps, 1)?;
                    let end_ms = Self::capture_to_millis(&caps, 5)?;
                    current_times = Some((start_ms, end_ms));
                    continue;
                }
            }

            if current_times.is_some() {
                if has_text {
                    current_text.push('\n');
                }
                current_text.push_str(trimmed);
                has_text = true;
            }
        }

        if current_times.is_some() {
            flush(
                &mut current_seq,
                &mut current_times,
                &mut current_text,
                &mut has_text,
                &mut entries,
            );
        }

        Ok(entries)
    }

    /// Get number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reassemble a timestamp from four regex capture groups
    fn capture_to_millis(caps: &regex::Captures, start_idx: usize) -> Result<u64, SubtitleError> {
        let group = |idx: usize| -> Result<u64, SubtitleError> {
            caps.get(idx)
                .ok_or_else(|| SubtitleError::InvalidTimestamp(caps[0].to_string()))?
                .as_str()
                .parse()
                .map_err(|_| SubtitleError::InvalidTimestamp(caps[0].to_string()))
        };

        let hours = group(start_idx)?;
        let minutes = group(start_idx + 1)?;
        let seconds = group(start_idx + 2)?;
        let millis = group(start_idx + 3)?;

        if minutes >= 60 || seconds >= 60 {
            return Err(SubtitleError::InvalidTimestamp(caps[0].to_string()));
        }

        Ok((hours * 3600 + minutes * 60 + seconds) * 1000 + millis)
    }
}

impl fmt::Display for SubtitleTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_srt())
    }
}

/// Round seconds to whole milliseconds, half-up.
///
/// Inputs are non-negative, so f64::round (half away from zero) is half-up here.
/// Rounding before the h/m/s/ms split keeps the millisecond field below 1000.
fn round_to_millis(seconds: f64) -> u64 {
    (seconds * 1000.0).round() as u64
}
