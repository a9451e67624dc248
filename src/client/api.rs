use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::notes::build_prompt;
use crate::stt::Transcription;

const WHISPER: &str = "Whisper server";
const OLLAMA: &str = "Ollama";

/// Failure modes of the two outbound calls. The interactive loop maps each
/// variant to a different user-facing message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint could not be reached at all (connect failure, timeout).
    #[error("cannot reach {service}: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("unexpected response from {service}: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build {service} request: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Blocking client for the two remote services the recorder talks to.
pub struct ApiClient {
    http: Client,
    whisper_url: String,
    whisper_timeout: Duration,
    ollama_url: String,
    ollama_model: String,
    ollama_timeout: Duration,
}

impl ApiClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            whisper_url: cfg.whisper.url.clone(),
            whisper_timeout: Duration::from_secs(cfg.whisper.timeout_secs),
            ollama_url: cfg.ollama.url.clone(),
            ollama_model: cfg.ollama.model.clone(),
            ollama_timeout: Duration::from_secs(cfg.ollama.timeout_secs),
        })
    }

    /// Upload one encoded recording and return its transcription.
    pub fn transcribe(&self, wav_bytes: Vec<u8>) -> Result<Transcription, ApiError> {
        debug!("Uploading {} bytes to {}", wav_bytes.len(), self.whisper_url);

        let part = multipart::Part::bytes(wav_bytes)
            .file_name("recording.wav")
            .mime_str("audio/wav")
            .map_err(|source| ApiError::Request {
                service: WHISPER,
                source,
            })?;
        let form = multipart::Form::new().part("audio", part);

        let response = self
            .http
            .post(&self.whisper_url)
            .multipart(form)
            .timeout(self.whisper_timeout)
            .send()
            .map_err(|source| ApiError::Transport {
                service: WHISPER,
                source,
            })?;

        Self::check(WHISPER, response)?
            .json()
            .map_err(|source| ApiError::Decode {
                service: WHISPER,
                source,
            })
    }

    /// Send the transcript through the meeting-notes prompt and return the
    /// formatted markdown.
    pub fn format_notes(&self, transcript: &str) -> Result<String, ApiError> {
        let request = GenerateRequest {
            model: self.ollama_model.clone(),
            prompt: build_prompt(transcript),
            stream: false,
        };

        let response = self
            .http
            .post(&self.ollama_url)
            .json(&request)
            .timeout(self.ollama_timeout)
            .send()
            .map_err(|source| ApiError::Transport {
                service: OLLAMA,
                source,
            })?;

        let parsed: GenerateResponse =
            Self::check(OLLAMA, response)?
                .json()
                .map_err(|source| ApiError::Decode {
                    service: OLLAMA,
                    source,
                })?;

        Ok(parsed.response)
    }

    fn check(service: &'static str, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().unwrap_or_default();
            Err(ApiError::Status {
                service,
                status,
                body,
            })
        }
    }
}
