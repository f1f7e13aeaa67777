use base64::{Engine as _, engine::general_purpose::STANDARD};
use bon::Builder;
use serde::Serialize;

use crate::{AudioFormat, Gender, SamplingRate, TaskType};

pub const DEFAULT_ASR_SAMPLING_RATE: u32 = 16000;
pub const DEFAULT_TTS_SAMPLING_RATE: u32 = 8000;

/// Speech recognition request
///
/// Format and sampling rate are checked when the request is sent, so an
/// unsupported value fails with a validation error instead of a remote one.
#[derive(Debug, Clone, Builder)]
pub struct AsrRequest {
    /// Raw audio bytes, sent base64 encoded
    pub audio: Vec<u8>,

    /// Language spoken in the audio
    #[builder(into)]
    pub source_language: String,

    #[builder(into, default = AudioFormat::default().to_string())]
    pub audio_format: String,

    #[builder(default = DEFAULT_ASR_SAMPLING_RATE)]
    pub sampling_rate: u32,
}

impl AsrRequest {
    pub fn new(audio: impl Into<Vec<u8>>, source_language: impl Into<String>) -> Self {
        Self::builder()
            .audio(audio.into())
            .source_language(source_language)
            .build()
    }
}

/// Text translation request
#[derive(Debug, Clone, Builder)]
pub struct TranslationRequest {
    #[builder(into)]
    pub text: String,
    #[builder(into)]
    pub source_language: String,
    #[builder(into)]
    pub target_language: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Speech synthesis request
#[derive(Debug, Clone, Builder)]
pub struct TtsRequest {
    #[builder(into)]
    pub text: String,

    #[builder(into)]
    pub source_language: String,

    /// `male` or `female`
    #[builder(into, default = Gender::default().to_string())]
    pub gender: String,

    #[builder(default = DEFAULT_TTS_SAMPLING_RATE)]
    pub sampling_rate: u32,
}

impl TtsRequest {
    pub fn new(text: impl Into<String>, source_language: impl Into<String>) -> Self {
        Self::builder()
            .text(text)
            .source_language(source_language)
            .build()
    }
}

/// Body posted to the compute endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ComputeRequest<'a> {
    pipeline_tasks: [PipelineTask<'a>; 1],
    input_data: InputData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PipelineTask<'a> {
    task_type: TaskType,
    config: TaskConfig<'a>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskConfig<'a> {
    language: LanguageConfig<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_format: Option<AudioFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sampling_rate: Option<SamplingRate>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct LanguageConfig<'a> {
    source_language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_language: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum InputData {
    Audio(Vec<AudioInput>),
    Input(Vec<TextInput>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioInput {
    audio_content: String,
}

#[derive(Debug, Serialize)]
struct TextInput {
    source: String,
}

impl<'a> ComputeRequest<'a> {
    pub(crate) fn asr(
        audio: &[u8],
        source_language: &'a str,
        service_id: Option<&'a str>,
        audio_format: AudioFormat,
        sampling_rate: SamplingRate,
    ) -> Self {
        Self {
            pipeline_tasks: [PipelineTask {
                task_type: TaskType::Asr,
                config: TaskConfig {
                    language: LanguageConfig {
                        source_language,
                        target_language: None,
                    },
                    service_id,
                    audio_format: Some(audio_format),
                    sampling_rate: Some(sampling_rate),
                    ..TaskConfig::default()
                },
            }],
            input_data: InputData::Audio(vec![AudioInput {
                audio_content: STANDARD.encode(audio),
            }]),
        }
    }

    pub(crate) fn translation(
        text: &str,
        source_language: &'a str,
        target_language: &'a str,
        service_id: Option<&'a str>,
    ) -> Self {
        Self {
            pipeline_tasks: [PipelineTask {
                task_type: TaskType::Translation,
                config: TaskConfig {
                    language: LanguageConfig {
                        source_language,
                        target_language: Some(target_language),
                    },
                    service_id,
                    ..TaskConfig::default()
                },
            }],
            input_data: InputData::Input(vec![TextInput {
                source: text.to_string(),
            }]),
        }
    }

    pub(crate) fn tts(
        text: &str,
        source_language: &'a str,
        service_id: Option<&'a str>,
        gender: Gender,
        sampling_rate: SamplingRate,
    ) -> Self {
        Self {
            pipeline_tasks: [PipelineTask {
                task_type: TaskType::Tts,
                config: TaskConfig {
                    language: LanguageConfig {
                        source_language,
                        target_language: None,
                    },
                    service_id,
                    gender: Some(gender),
                    sampling_rate: Some(sampling_rate),
                    ..TaskConfig::default()
                },
            }],
            input_data: InputData::Input(vec![TextInput {
                source: text.to_string(),
            }]),
        }
    }
}

/// Body posted to the pipeline config endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PipelineConfigRequest<'a> {
    pipeline_tasks: Vec<TaskTypeOnly>,
    pipeline_request_config: PipelineRequestConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskTypeOnly {
    task_type: TaskType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PipelineRequestConfig<'a> {
    pipeline_id: &'a str,
}

impl<'a> PipelineConfigRequest<'a> {
    pub(crate) fn new(pipeline_id: &'a str) -> Self {
        Self {
            pipeline_tasks: [TaskType::Asr, TaskType::Translation, TaskType::Tts]
                .into_iter()
                .map(|task_type| TaskTypeOnly { task_type })
                .collect(),
            pipeline_request_config: PipelineRequestConfig { pipeline_id },
        }
    }
}
