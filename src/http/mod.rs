//! HTTP surface of the transcription server:
//! - POST /transcribe - multipart WAV upload, returns the transcript
//! - GET /health - liveness check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::stt::WhisperEngine;

/// Load the model once and serve until shutdown.
pub async fn serve(cfg: Config) -> Result<()> {
    let engine = WhisperEngine::load(&cfg.server.model_path, cfg.server.beam_size)?;
    let state = AppState::new(Arc::new(engine));
    let router = create_router(state);

    let addr = format!("{}:{}", cfg.server.bind, cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Transcription server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .context("HTTP server error")?;

    Ok(())
}
