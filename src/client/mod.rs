//! Interactive recorder: capture → transcribe → format → save.

mod api;

pub use api::{ApiClient, ApiError};

use anyhow::Result;
use std::io::{self, BufRead, Write};

use crate::audio::{encode_wav, CaptureHandle};
use crate::config::Config;
use crate::notes::NoteWriter;

/// Console preview length for transcripts.
const PREVIEW_CHARS: usize = 200;

/// Run the interactive recording loop. Enter starts a recording, Enter stops
/// it, `q` quits. Every failure is reported and the loop returns to the
/// prompt; nothing here is fatal.
pub fn run(cfg: &Config) -> Result<()> {
    let api = ApiClient::new(cfg)?;
    let writer = NoteWriter::new(&cfg.notes.vault_path, &cfg.ollama.model);

    println!("{}", "=".repeat(50));
    println!("  Voice Notes Recorder");
    println!("{}", "=".repeat(50));
    println!("  Whisper: {}", cfg.whisper.url);
    println!("  Ollama:  {}", cfg.ollama.model);
    println!("  Output:  {}", writer.vault().display());

    let stdin = io::stdin();
    let mut lines = stdin.lock();

    loop {
        println!("\n  Press Enter to start recording (or 'q' to quit):");
        print!("  > ");
        io::stdout().flush()?;

        let mut choice = String::new();
        if lines.read_line(&mut choice)? == 0 {
            // stdin closed; treat like quit
            break;
        }
        if choice.trim().eq_ignore_ascii_case("q") {
            println!("  Bye!");
            break;
        }

        let capture = match CaptureHandle::start(cfg.audio.sample_rate) {
            Ok(capture) => capture,
            Err(e) => {
                println!("  ERROR: {:#}", e);
                continue;
            }
        };

        println!("\n  Recording... press Enter to stop.\n");
        let mut stop = String::new();
        lines.read_line(&mut stop)?;

        let samples = match capture.stop() {
            Ok(samples) => samples,
            Err(e) => {
                println!("  ERROR: {:#}", e);
                continue;
            }
        };

        if samples.is_empty() {
            println!("  No audio captured, try again.");
            continue;
        }

        let duration_secs =
            (samples.len() as f64 / cfg.audio.sample_rate as f64 * 10.0).round() / 10.0;
        println!("  Captured {}s of audio.", duration_secs);

        if let Err(e) = process_recording(&api, &writer, &samples, cfg.audio.sample_rate) {
            report(&e);
        }
    }

    Ok(())
}

/// Drive one captured recording through the rest of the pipeline.
fn process_recording(
    api: &ApiClient,
    writer: &NoteWriter,
    samples: &[i16],
    sample_rate: u32,
) -> Result<()> {
    let wav_bytes = encode_wav(samples, sample_rate)?;

    println!("  Transcribing...");
    let result = api.transcribe(wav_bytes)?;

    println!(
        "\n  Transcript ({}, {}s):",
        result.language, result.duration
    );
    println!("  {}\n", preview(&result.text));

    println!("  Formatting notes with LLM...");
    let formatted = api.format_notes(&result.text)?;

    let path = writer.save(&formatted, &result.text, result.duration)?;
    println!("  Saved to: {}", path.display());

    Ok(())
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Transport { .. }) => {
            println!("  ERROR: Cannot reach server. Is the Whisper server running?");
        }
        Some(ApiError::Status { status, body, .. }) => {
            println!("  ERROR: Server returned {}: {}", status, body);
        }
        _ => println!("  ERROR: {:#}", err),
    }
}

/// First 200 characters of the transcript for console display; longer text
/// gets an ellipsis marker. The note file always receives the full text.
fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(preview("hello"), "hello");
    }

    #[test]
    fn exactly_200_chars_is_untouched() {
        let text = "a".repeat(200);
        assert_eq!(preview(&text), text);
    }

    #[test]
    fn long_text_is_truncated_with_marker() {
        let text = "a".repeat(250);
        let shown = preview(&text);
        assert_eq!(shown.len(), 203);
        assert!(shown.ends_with("..."));
        assert!(shown.starts_with(&"a".repeat(200)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(300);
        let shown = preview(&text);
        assert_eq!(shown.chars().count(), 203);
        assert!(shown.ends_with("..."));
    }
}
