// Integration tests for the transcription server's HTTP surface.
//
// The Whisper engine is replaced with a mock so the handler's multipart
// parsing, temp-file lifecycle, and error mapping can be tested in isolation.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use voice_notes::stt::{join_segments, SpeechToText, Transcription};
use voice_notes::{create_router, encode_wav, AppState};

/// Records what the handler hands to the engine so tests can inspect the
/// temp file's content and verify it is gone afterwards.
#[derive(Default)]
struct MockTranscriber {
    fail: bool,
    seen_paths: Mutex<Vec<PathBuf>>,
    seen_bytes: Mutex<Vec<Vec<u8>>>,
}

impl SpeechToText for MockTranscriber {
    fn transcribe_file(&self, path: &Path) -> Result<Transcription> {
        self.seen_paths.lock().unwrap().push(path.to_path_buf());
        self.seen_bytes
            .lock()
            .unwrap()
            .push(std::fs::read(path)?);

        if self.fail {
            anyhow::bail!("model exploded");
        }

        Ok(Transcription {
            text: join_segments([" Hello there.", "  General Kenobi. "]),
            language: "en".to_string(),
            duration: 2.5,
        })
    }
}

fn multipart_request(field_name: &str, payload: &[u8]) -> Request<Body> {
    let boundary = "test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"recording.wav\"\r\n",
            field_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: audio/wav\r\n\r\n");
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/transcribe")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_always_ok() {
    let state = AppState::new(Arc::new(MockTranscriber::default()));
    let app = create_router(state);

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "status": "ok" })
    );
}

#[tokio::test]
async fn transcribe_returns_joined_trimmed_text() -> Result<()> {
    let mock = Arc::new(MockTranscriber::default());
    let app = create_router(AppState::new(mock.clone()));

    let wav = encode_wav(&[100i16, -100, 200, -200], 16000)?;
    let response = app.oneshot(multipart_request("audio", &wav)).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["text"], "Hello there. General Kenobi.");
    assert_eq!(json["language"], "en");
    assert_eq!(json["duration"], 2.5);

    // The upload reached the engine byte-for-byte via the temp file.
    let seen_bytes = mock.seen_bytes.lock().unwrap();
    assert_eq!(seen_bytes.len(), 1);
    assert_eq!(seen_bytes[0], wav);

    // The temp file is gone once the response is out.
    let seen_paths = mock.seen_paths.lock().unwrap();
    assert_eq!(seen_paths.len(), 1);
    assert!(seen_paths[0].to_string_lossy().ends_with(".wav"));
    assert!(!seen_paths[0].exists());

    Ok(())
}

#[tokio::test]
async fn engine_failure_maps_to_500_and_cleans_up() -> Result<()> {
    let mock = Arc::new(MockTranscriber {
        fail: true,
        ..Default::default()
    });
    let app = create_router(AppState::new(mock.clone()));

    let wav = encode_wav(&[1i16, 2, 3], 16000)?;
    let response = app.oneshot(multipart_request("audio", &wav)).await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["detail"]
        .as_str()
        .unwrap()
        .contains("model exploded"));

    // Cleanup is guaranteed on the failure path too.
    let seen_paths = mock.seen_paths.lock().unwrap();
    assert_eq!(seen_paths.len(), 1);
    assert!(!seen_paths[0].exists());

    Ok(())
}

#[tokio::test]
async fn missing_audio_field_is_a_client_error() {
    let mock = Arc::new(MockTranscriber::default());
    let app = create_router(AppState::new(mock.clone()));

    let response = app
        .oneshot(multipart_request("attachment", b"not audio"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("audio"));

    // The engine is never consulted for a malformed request.
    assert!(mock.seen_paths.lock().unwrap().is_empty());
}
