use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub whisper: WhisperConfig,
    pub ollama: OllamaConfig,
    pub notes: NotesConfig,
    pub audio: AudioConfig,
    pub server: ServerConfig,
}

/// Transcription endpoint the recorder posts captured audio to.
#[derive(Debug, Clone, Deserialize)]
pub struct WhisperConfig {
    pub url: String,
    /// Transcription of a long recording can take minutes.
    pub timeout_secs: u64,
}

/// Text-generation endpoint used to format raw transcripts.
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotesConfig {
    pub vault_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    pub sample_rate: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub model_path: String,
    pub beam_size: i32,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
