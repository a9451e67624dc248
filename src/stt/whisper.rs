use anyhow::{ensure, Context, Result};
use std::path::Path;
use tracing::info;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use super::{join_segments, SpeechToText, Transcription};
use crate::audio::read_wav_mono_f32;

/// Sample rate Whisper models are trained on.
const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Whisper model wrapper. Loaded once at server startup and shared read-only
/// across requests; each transcription runs on its own inference state.
pub struct WhisperEngine {
    ctx: WhisperContext,
    beam_size: i32,
}

impl WhisperEngine {
    pub fn load(model_path: &str, beam_size: i32) -> Result<Self> {
        info!("Loading Whisper model: {}", model_path);

        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .with_context(|| format!("Failed to load Whisper model: {}", model_path))?;

        info!("Whisper model loaded (beam size {})", beam_size);

        Ok(Self { ctx, beam_size })
    }
}

impl SpeechToText for WhisperEngine {
    fn transcribe_file(&self, path: &Path) -> Result<Transcription> {
        let (samples, sample_rate) = read_wav_mono_f32(path)?;
        ensure!(
            sample_rate == WHISPER_SAMPLE_RATE,
            "Whisper expects {} Hz audio, got {} Hz",
            WHISPER_SAMPLE_RATE,
            sample_rate
        );
        ensure!(!samples.is_empty(), "uploaded audio contains no samples");

        let duration = super::duration_secs(samples.len(), sample_rate);

        let mut params = FullParams::new(SamplingStrategy::BeamSearch {
            beam_size: self.beam_size,
            patience: -1.0,
        });
        // None lets Whisper detect the spoken language.
        params.set_language(None);
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        let mut state = self
            .ctx
            .create_state()
            .context("Failed to create Whisper state")?;
        state
            .full(params, &samples)
            .context("Whisper inference failed")?;

        let num_segments = state
            .full_n_segments()
            .context("Failed to read segment count")?;
        let mut segments = Vec::with_capacity(num_segments as usize);
        for i in 0..num_segments {
            let segment = state
                .full_get_segment_text(i)
                .with_context(|| format!("Failed to read segment {}", i))?;
            segments.push(segment);
        }

        let language = state
            .full_lang_id_from_state()
            .ok()
            .and_then(whisper_rs::get_lang_str)
            .unwrap_or("en")
            .to_string();

        Ok(Transcription {
            text: join_segments(&segments),
            language,
            duration,
        })
    }
}
