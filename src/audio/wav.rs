use anyhow::{ensure, Context, Result};
use std::io::Cursor;
use std::path::Path;

/// Encode captured samples as an in-memory WAV file (mono, 16-bit PCM).
///
/// Refuses an empty capture so that no request is ever built around a
/// zero-sample container.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    ensure!(!samples.is_empty(), "refusing to encode an empty recording");

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .context("Failed to create WAV writer")?;
        for &sample in samples {
            writer
                .write_sample(sample)
                .context("Failed to write sample to WAV")?;
        }
        writer.finalize().context("Failed to finalize WAV data")?;
    }

    Ok(cursor.into_inner())
}

/// Read a WAV file into normalized f32 mono samples for Whisper inference.
///
/// Stereo input is downmixed by averaging channel pairs. Returns the samples
/// together with the file's sample rate.
pub fn read_wav_mono_f32(path: &Path) -> Result<(Vec<f32>, u32)> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            ensure!(
                spec.bits_per_sample == 16,
                "unsupported bit depth: {} (expected 16-bit PCM)",
                spec.bits_per_sample
            );
            reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / 32768.0))
                .collect::<Result<_, _>>()
                .context("Failed to read audio samples")?
        }
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .context("Failed to read audio samples")?,
    };

    let mono = match spec.channels {
        1 => samples,
        2 => samples
            .chunks_exact(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect(),
        n => anyhow::bail!("unsupported channel count: {}", n),
    };

    Ok((mono, spec.sample_rate))
}
