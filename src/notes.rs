//! Meeting-note formatting and vault output.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Instruction template sent to the text-generation service. The raw
/// transcript is interpolated verbatim; it is untrusted text and the
/// formatter output is treated accordingly (a known limitation of the
/// workflow, not a security boundary).
pub const MEETING_PROMPT: &str = "You are a meeting notes formatter. Given a raw voice transcript, produce clean structured meeting notes in markdown. Include these sections only if relevant content exists:

## Attendees
- (list if mentioned)

## Key Points
- (main topics discussed)

## Action Items
- [ ] (tasks assigned, with owner if mentioned)

## Decisions
- (decisions made)

## Notes
- (anything else noteworthy)

Keep it concise. Do not add information that wasn't in the transcript. If the transcript is short or informal, keep the notes proportionally brief.

Raw transcript:
{transcript}";

/// Interpolate the transcript into the formatter instruction template.
pub fn build_prompt(transcript: &str) -> String {
    MEETING_PROMPT.replace("{transcript}", transcript)
}

/// Filename for a note completed at `when`: minute precision plus a fixed
/// suffix. Two recordings finishing within the same minute share a name and
/// the later one overwrites the earlier; that matches the original workflow
/// and is deliberate.
pub fn note_filename(when: DateTime<Local>) -> String {
    format!("{}-meeting-notes.md", when.format("%Y-%m-%d-%H%M"))
}

/// Render the markdown note: heading, metadata line, formatted body, and a
/// collapsible section holding the untouched raw transcript.
pub fn render_note(
    formatted: &str,
    transcript: &str,
    duration: f64,
    model: &str,
    when: DateTime<Local>,
) -> String {
    format!(
        "# Meeting Notes - {}\n\n> Duration: {}s | Transcribed with Whisper + {}\n\n{}\n\n---\n\n<details>\n<summary>Raw Transcript</summary>\n\n{}\n\n</details>\n",
        when.format("%Y-%m-%d %H:%M"),
        duration,
        model,
        formatted,
        transcript,
    )
}

/// Writes completed notes into the vault directory.
pub struct NoteWriter {
    vault: PathBuf,
    model: String,
}

impl NoteWriter {
    pub fn new(vault: impl Into<PathBuf>, model: impl Into<String>) -> Self {
        Self {
            vault: vault.into(),
            model: model.into(),
        }
    }

    pub fn vault(&self) -> &Path {
        &self.vault
    }

    /// Write one note file and return its path.
    pub fn save(&self, formatted: &str, transcript: &str, duration: f64) -> Result<PathBuf> {
        fs::create_dir_all(&self.vault).with_context(|| {
            format!("Failed to create vault directory: {}", self.vault.display())
        })?;

        let now = Local::now();
        let path = self.vault.join(note_filename(now));
        let content = render_note(formatted, transcript, duration, &self.model, now);

        fs::write(&path, content)
            .with_context(|| format!("Failed to write note: {}", path.display()))?;

        info!("Saved note: {}", path.display());

        Ok(path)
    }
}
