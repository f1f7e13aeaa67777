//! Pipeline discovery: which services a pipeline id routes to, and the
//! inference key that authorizes compute calls against it.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::{
    Bhashini, BhashiniRequestError, TaskType,
    internal::BhashiniRequestHelper,
    language::{LanguageTable, ServiceInfo},
    request::PipelineConfigRequest,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PipelineConfigResponse {
    #[serde(rename = "pipelineInferenceAPIEndPoint")]
    pipeline_inference_api_endpoint: InferenceEndpoint,
    pipeline_response_config: Vec<TaskConfigEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InferenceEndpoint {
    callback_url: String,
    inference_api_key: InferenceApiKey,
}

#[derive(Debug, Deserialize)]
struct InferenceApiKey {
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskConfigEntry {
    task_type: String,
    #[serde(default)]
    config: Vec<LanguageConfigEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LanguageConfigEntry {
    service_id: String,
    language: LanguageEntry,
    #[serde(default)]
    supported_voices: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LanguageEntry {
    source_language: String,
    #[serde(default)]
    target_language: Option<String>,
    #[serde(default)]
    source_script_code: Option<String>,
    #[serde(default)]
    target_script_code: Option<String>,
}

/// What the pipeline config endpoint reported for a pipeline id
#[derive(Debug, Clone)]
pub struct PipelineDiscovery {
    pub inference_api_key: String,
    pub callback_url: String,
    pub languages: LanguageTable,
}

impl PipelineDiscovery {
    /// Build from the JSON returned by the pipeline config endpoint.
    ///
    /// Task types other than asr, translation and tts are ignored.
    pub fn from_value(raw: &Value) -> Result<Self, BhashiniRequestError> {
        let response = PipelineConfigResponse::deserialize(raw).map_err(|e| {
            BhashiniRequestError::MalformedResponse(format!("pipeline config: {e}"))
        })?;

        let mut languages = LanguageTable::empty();
        for entry in response.pipeline_response_config {
            let Ok(task) = entry.task_type.parse::<TaskType>() else {
                debug!(task_type = %entry.task_type, "skipping unknown pipeline task");
                continue;
            };

            for config in entry.config {
                let source = config.language.source_language;
                let mut service = ServiceInfo {
                    service_id: Some(config.service_id),
                    source_script_code: config.language.source_script_code,
                    target_script_code: None,
                    supported_voices: Vec::new(),
                };

                match task {
                    TaskType::Asr => {
                        languages.add_asr(source, service);
                    }
                    TaskType::Tts => {
                        service.supported_voices = config.supported_voices;
                        languages.add_tts(source, service);
                    }
                    TaskType::Translation => {
                        let target = config.language.target_language.ok_or_else(|| {
                            BhashiniRequestError::MalformedResponse(format!(
                                "pipeline config: translation entry for '{source}' has no targetLanguage"
                            ))
                        })?;
                        service.target_script_code = config.language.target_script_code;
                        languages.add_translation(source, target, service);
                    }
                }
            }
        }

        let endpoint = response.pipeline_inference_api_endpoint;
        Ok(Self {
            inference_api_key: endpoint.inference_api_key.value,
            callback_url: endpoint.callback_url,
            languages,
        })
    }
}

impl Bhashini {
    /// Ask the pipeline config endpoint which services serve this pipeline id.
    #[instrument(skip_all, fields(pipeline_id = %self.pipeline_id))]
    pub async fn discover_pipeline(&self) -> Result<PipelineDiscovery, BhashiniRequestError> {
        let body = PipelineConfigRequest::new(&self.pipeline_id);
        // The config endpoint authenticates with the ULCA key alone
        let helper = BhashiniRequestHelper::new(&self.client, &self.user_id, &self.api_key, None);
        let raw = helper.post_json(&self.config_url, &body).await?;
        PipelineDiscovery::from_value(&raw)
    }

    /// Replace the language table and inference key with what discovery reports.
    pub async fn with_discovered_pipeline(self) -> Result<Self, BhashiniRequestError> {
        let discovery = self.discover_pipeline().await?;
        info!(
            pipeline_id = %self.pipeline_id,
            callback_url = %discovery.callback_url,
            "discovered Bhashini pipeline"
        );
        Ok(Self {
            inference_api_key: Some(discovery.inference_api_key),
            languages: discovery.languages,
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AvailableLanguages, Gender};
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "languages": [],
            "pipelineResponseConfig": [
                {
                    "taskType": "asr",
                    "config": [
                        {
                            "serviceId": "ai4bharat/conformer-hi",
                            "modelId": "m1",
                            "language": {"sourceLanguage": "hi", "sourceScriptCode": "Deva"}
                        }
                    ]
                },
                {
                    "taskType": "translation",
                    "config": [
                        {
                            "serviceId": "ai4bharat/indictrans",
                            "language": {
                                "sourceLanguage": "hi",
                                "sourceScriptCode": "Deva",
                                "targetLanguage": "gu",
                                "targetScriptCode": "Gujr"
                            }
                        }
                    ]
                },
                {
                    "taskType": "tts",
                    "config": [
                        {
                            "serviceId": "ai4bharat/indic-tts",
                            "language": {"sourceLanguage": "gu"},
                            "supportedVoices": ["female"]
                        }
                    ]
                },
                {"taskType": "transliteration", "config": []}
            ],
            "pipelineInferenceAPIEndPoint": {
                "callbackUrl": "https://dhruva-api.bhashini.gov.in/services/inference/pipeline",
                "inferenceApiKey": {"name": "Authorization", "value": "inference-key"},
                "isMultilingualEnabled": true,
                "isSyncApi": true
            }
        })
    }

    #[test]
    fn parses_languages_and_key() {
        let discovery = PipelineDiscovery::from_value(&sample()).unwrap();
        assert_eq!(discovery.inference_api_key, "inference-key");
        assert!(discovery.callback_url.ends_with("/inference/pipeline"));

        let table = &discovery.languages;
        assert_eq!(
            table.available(TaskType::Asr),
            AvailableLanguages::List(vec!["hi".to_string()])
        );
        let nmt = table.translation_service("hi", "gu").unwrap();
        assert_eq!(nmt.service_id.as_deref(), Some("ai4bharat/indictrans"));
        assert_eq!(nmt.target_script_code.as_deref(), Some("Gujr"));
        assert_eq!(table.voices("gu").unwrap(), vec![Gender::Female]);
    }

    #[test]
    fn missing_inference_endpoint_is_malformed() {
        let mut raw = sample();
        raw.as_object_mut()
            .unwrap()
            .remove("pipelineInferenceAPIEndPoint");
        assert!(matches!(
            PipelineDiscovery::from_value(&raw),
            Err(BhashiniRequestError::MalformedResponse(_))
        ));
    }

    #[test]
    fn translation_without_target_is_malformed() {
        let raw = json!({
            "pipelineResponseConfig": [{
                "taskType": "translation",
                "config": [{"serviceId": "s", "language": {"sourceLanguage": "hi"}}]
            }],
            "pipelineInferenceAPIEndPoint": {
                "callbackUrl": "https://example.test",
                "inferenceApiKey": {"value": "k"}
            }
        });
        let err = PipelineDiscovery::from_value(&raw).unwrap_err();
        assert!(err.to_string().contains("targetLanguage"));
    }
}
