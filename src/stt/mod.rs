//! Speech recognition behind the transcription server.

mod whisper;

pub use whisper::WhisperEngine;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of transcribing one uploaded recording.
///
/// This is the wire type: the server serializes it as the `/transcribe`
/// response body and the recorder client deserializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    pub language: String,
    /// Audio duration in seconds, rounded to 2 decimal places.
    pub duration: f64,
}

/// A speech-recognition backend.
///
/// The engine is constructed once in the composition root and injected into
/// the HTTP state, so handlers can be exercised against a mock.
pub trait SpeechToText: Send + Sync {
    fn transcribe_file(&self, path: &Path) -> Result<Transcription>;
}

/// Audio duration in seconds, rounded to 2 decimal places for the response.
pub fn duration_secs(sample_count: usize, sample_rate: u32) -> f64 {
    (sample_count as f64 / sample_rate as f64 * 100.0).round() / 100.0
}

/// Join segment texts the way the transcript is assembled: each segment
/// trimmed, single spaces in between.
pub fn join_segments<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_trimmed_and_space_joined() {
        let joined = join_segments([" Hello there.", "  How are you?  ", "Fine."]);
        assert_eq!(joined, "Hello there. How are you? Fine.");
    }

    #[test]
    fn single_segment_is_just_trimmed() {
        assert_eq!(join_segments([" one "]), "one");
    }

    #[test]
    fn no_segments_yield_empty_text() {
        assert_eq!(join_segments(Vec::<&str>::new()), "");
    }

    #[test]
    fn duration_rounds_to_two_decimals() {
        assert_eq!(duration_secs(40_123, 16_000), 2.51);
        assert_eq!(duration_secs(16_000, 16_000), 1.0);
        assert_eq!(duration_secs(8_000, 16_000), 0.5);
    }
}
