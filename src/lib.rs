pub mod audio;
pub mod client;
pub mod config;
pub mod http;
pub mod notes;
pub mod stt;

pub use audio::{encode_wav, read_wav_mono_f32, CaptureHandle};
pub use client::{ApiClient, ApiError};
pub use config::Config;
pub use http::{create_router, AppState};
pub use notes::NoteWriter;
pub use stt::{SpeechToText, Transcription, WhisperEngine};
