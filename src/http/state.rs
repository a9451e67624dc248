use std::sync::Arc;

use crate::stt::SpeechToText;

/// Shared application state for HTTP handlers.
///
/// The engine is injected by the composition root (a real Whisper model in
/// production, a mock in handler tests) and shared read-only across requests.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn SpeechToText>,
}

impl AppState {
    pub fn new(engine: Arc<dyn SpeechToText>) -> Self {
        Self { engine }
    }
}
