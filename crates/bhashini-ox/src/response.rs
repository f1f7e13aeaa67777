use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;
use serde_json::Value;

use crate::{BhashiniRequestError, TaskType};

/// Typed view of a compute response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PipelineEnvelope {
    pipeline_response: Vec<TaskOutput>,
}

/// One entry of `pipelineResponse`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskOutput {
    #[serde(default)]
    output: Option<Vec<TextOutput>>,
    #[serde(default)]
    audio: Option<Vec<AudioOutput>>,
}

#[derive(Debug, Clone, Deserialize)]
struct TextOutput {
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    target: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AudioOutput {
    audio_content: String,
}

fn first_task(raw: &Value, task: TaskType) -> Result<TaskOutput, BhashiniRequestError> {
    let envelope = PipelineEnvelope::deserialize(raw).map_err(|e| {
        BhashiniRequestError::MalformedResponse(format!("{task} response: {e}"))
    })?;

    envelope.pipeline_response.into_iter().next().ok_or_else(|| {
        BhashiniRequestError::MalformedResponse(format!("{task} response: empty pipelineResponse"))
    })
}

fn first_text(raw: &Value, task: TaskType) -> Result<TextOutput, BhashiniRequestError> {
    first_task(raw, task)?
        .output
        .and_then(|outputs| outputs.into_iter().next())
        .ok_or_else(|| {
            BhashiniRequestError::MalformedResponse(format!(
                "{task} response: missing pipelineResponse[0].output[0]"
            ))
        })
}

/// Result of a speech recognition call
#[derive(Debug, Clone)]
pub struct AsrResult {
    transcript: String,
    raw: Value,
}

impl AsrResult {
    pub(crate) fn from_raw(raw: Value) -> Result<Self, BhashiniRequestError> {
        let transcript = first_text(&raw, TaskType::Asr)?.source.ok_or_else(|| {
            BhashiniRequestError::MalformedResponse(
                "asr response: missing pipelineResponse[0].output[0].source".to_string(),
            )
        })?;
        Ok(Self { transcript, raw })
    }

    /// Recognized text, `pipelineResponse[0].output[0].source`
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// The response exactly as the service returned it
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}

/// Result of a translation call
#[derive(Debug, Clone)]
pub struct TranslationResult {
    source: String,
    target: String,
    raw: Value,
}

impl TranslationResult {
    pub(crate) fn from_raw(raw: Value) -> Result<Self, BhashiniRequestError> {
        let output = first_text(&raw, TaskType::Translation)?;
        let target = output.target.ok_or_else(|| {
            BhashiniRequestError::MalformedResponse(
                "translation response: missing pipelineResponse[0].output[0].target".to_string(),
            )
        })?;
        Ok(Self {
            source: output.source.unwrap_or_default(),
            target,
            raw,
        })
    }

    /// Text that was translated, as echoed by the service
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Translated text
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}

/// Result of a speech synthesis call
///
/// Holds the base64 audio as returned; decoding is left to the caller.
#[derive(Debug, Clone)]
pub struct TtsResult {
    audio_content: String,
    raw: Value,
}

impl TtsResult {
    pub(crate) fn from_raw(raw: Value) -> Result<Self, BhashiniRequestError> {
        let audio_content = first_task(&raw, TaskType::Tts)?
            .audio
            .and_then(|audio| audio.into_iter().next())
            .map(|audio| audio.audio_content)
            .ok_or_else(|| {
                BhashiniRequestError::MalformedResponse(
                    "tts response: missing pipelineResponse[0].audio[0].audioContent".to_string(),
                )
            })?;
        Ok(Self { audio_content, raw })
    }

    /// Base64 audio, `pipelineResponse[0].audio[0].audioContent`
    pub fn audio_content(&self) -> &str {
        &self.audio_content
    }

    /// Decode the audio into raw bytes (WAV for the public pipeline)
    pub fn decode_audio(&self) -> Result<Vec<u8>, BhashiniRequestError> {
        STANDARD.decode(self.audio_content.trim()).map_err(|e| {
            BhashiniRequestError::MalformedResponse(format!("tts audio is not valid base64: {e}"))
        })
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}
