/*!
 * Common test utilities for the vocasub test suite
 */

use std::fs;
use std::path::PathBuf;
use anyhow::Result;
use tempfile::TempDir;
use vocasub::subtitle_formatter::Segment;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// The two-segment transcript used across the formatter tests
pub fn hello_world_segments() -> Vec<Segment> {
    vec![
        Segment::new(0.0, 1.5, "Hello"),
        Segment::new(1.5, 3.25, "world"),
    ]
}

/// The SRT document the hello/world transcript must serialize to
pub fn hello_world_srt() -> &'static str {
    "1\n00:00:00,000 --> 00:00:01,500\nHello\n\n2\n00:00:01,500 --> 00:00:03,250\nworld\n\n"
}
