use serde::Deserialize;
use thiserror::Error;

/// Error body returned by the Bhashini services
#[derive(Debug, Deserialize)]
struct BhashiniApiErrorPayload {
    message: Option<String>,
    error: Option<BhashiniApiError>,
    detail: Option<serde_json::Value>,
}

/// Nested error object used by some Dhruva endpoints
#[derive(Debug, Deserialize)]
struct BhashiniApiError {
    message: Option<String>,
}

/// Errors that can occur when making requests to the Bhashini API
#[derive(Debug, Error)]
pub enum BhashiniRequestError {
    /// HTTP client errors
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error("Invalid task type '{0}'. Choose from 'asr', 'translation', or 'tts'")]
    InvalidTaskType(String),

    /// The language has no entry in the language table for this task
    #[error("{task} not supported for language '{language}'. Available languages: {available}")]
    UnsupportedLanguage {
        task: String,
        language: String,
        available: String,
    },

    /// The source language is known but the target is not listed for it
    #[error(
        "Translation from '{source_language}' to '{target_language}' not supported. Available target languages: {available}"
    )]
    UnsupportedLanguagePair {
        source_language: String,
        target_language: String,
        available: String,
    },

    #[error("Unsupported audio format '{0}'. Supported formats: wav, mp3, flac, ogg")]
    UnsupportedFormat(String),

    #[error("Unsupported sampling rate {0} Hz. Supported rates: 8000, 16000, 48000")]
    UnsupportedSamplingRate(u32),

    #[error("Unsupported voice gender '{gender}'. Available voices: {available}")]
    UnsupportedGender { gender: String, available: String },

    /// Non-2xx response from the remote service
    #[error("Bhashini service returned HTTP {status}: {message}")]
    RemoteServiceError {
        status: u16,
        message: String,
        body: String,
    },

    /// The response did not contain the keys the call depends on
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl BhashiniRequestError {
    /// HTTP status carried by a remote service error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteServiceError { status, .. } => Some(*status),
            Self::ReqwestError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this error was raised locally before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidTaskType(_)
                | Self::UnsupportedLanguage { .. }
                | Self::UnsupportedLanguagePair { .. }
                | Self::UnsupportedFormat(_)
                | Self::UnsupportedSamplingRate(_)
                | Self::UnsupportedGender { .. }
        )
    }
}

/// Parse an error response from the Bhashini API
pub(crate) fn parse_error_response(
    status: reqwest::StatusCode,
    bytes: bytes::Bytes,
) -> BhashiniRequestError {
    let body = String::from_utf8_lossy(&bytes).to_string();

    let message = serde_json::from_slice::<BhashiniApiErrorPayload>(&bytes)
        .ok()
        .and_then(|payload| {
            payload
                .message
                .or_else(|| payload.error.and_then(|e| e.message))
                .or_else(|| payload.detail.map(|d| match d {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                }))
        })
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("An error occurred.")
                    .to_string()
            } else {
                body.clone()
            }
        });

    BhashiniRequestError::RemoteServiceError {
        status: status.as_u16(),
        message,
        body,
    }
}
