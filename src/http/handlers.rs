use super::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::path::Path;
use tracing::{error, info};

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// POST /transcribe
///
/// Accept an uploaded audio file, run it through the engine, return the
/// transcript. The upload lands in a uniquely named temp file that is removed
/// on every exit path (`NamedTempFile` drops it whether the model call
/// succeeds or fails, and tolerates the file already being gone).
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut upload: Option<(String, axum::body::Bytes)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("audio") {
                    let filename = field.file_name().unwrap_or("recording.wav").to_string();
                    match field.bytes().await {
                        Ok(bytes) => {
                            upload = Some((filename, bytes));
                            break;
                        }
                        Err(e) => {
                            return bad_request(format!("failed to read upload: {}", e))
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(e) => return bad_request(format!("malformed multipart body: {}", e)),
        }
    }

    let Some((filename, bytes)) = upload else {
        return bad_request("missing `audio` form field".to_string());
    };

    info!("Received upload: {} ({} bytes)", filename, bytes.len());

    let suffix = Path::new(&filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_else(|| ".wav".to_string());

    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || {
        let tmp = tempfile::Builder::new()
            .prefix("voice-notes-")
            .suffix(&suffix)
            .tempfile()?;
        std::fs::write(tmp.path(), &bytes)?;
        engine.transcribe_file(tmp.path())
    })
    .await;

    match result {
        Ok(Ok(transcription)) => (StatusCode::OK, Json(transcription)).into_response(),
        Ok(Err(e)) => {
            error!("Transcription failed: {:#}", e);
            server_error(format!("{:#}", e))
        }
        Err(e) => {
            error!("Transcription task panicked: {}", e);
            server_error("transcription task failed".to_string())
        }
    }
}

/// GET /health
///
/// Static liveness signal, independent of model state.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

fn bad_request(detail: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorDetail { detail })).into_response()
}

fn server_error(detail: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorDetail { detail })).into_response()
}
