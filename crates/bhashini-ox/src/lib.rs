//! Bhashini API client for Rust
//!
//! Wraps the Bhashini (ULCA / Dhruva) pipeline service for:
//! - Automatic speech recognition
//! - Translation between Indian languages
//! - Text-to-speech
//!
//! # Example
//!
//! ```rust,no_run
//! use bhashini_ox::{Bhashini, TranslationRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Bhashini::new("user-id", "ulca-api-key");
//!
//!     let request = TranslationRequest::new("मेरा नाम विहिर है।", "hi", "gu");
//!     let response = client.translate(&request).await?;
//!     println!("{}", response.target());
//!
//!     Ok(())
//! }
//! ```

#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(clippy::pedantic, clippy::unwrap_used)]

mod compute;
pub mod error;
mod internal;
pub mod language;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod task;

pub use error::BhashiniRequestError;
pub use language::{AvailableLanguages, LanguageTable, ServiceInfo};
pub use pipeline::PipelineDiscovery;
pub use request::{AsrRequest, TranslationRequest, TtsRequest};
pub use response::{AsrResult, TranslationResult, TtsResult};
pub use task::{AudioFormat, Gender, SamplingRate, TaskType};

use bon::Builder;
use core::fmt;

use crate::internal::BhashiniRequestHelper;

/// Dhruva inference endpoint that runs ASR, translation and TTS tasks
pub const COMPUTE_URL: &str = "https://dhruva-api.bhashini.gov.in/services/inference/pipeline";
/// ULCA endpoint that describes the services behind a pipeline id
pub const PIPELINE_CONFIG_URL: &str =
    "https://meity-auth.ulcacontrib.org/ulca/apis/v0/model/getModelsPipeline";
/// Public MeitY pipeline
pub const DEFAULT_PIPELINE_ID: &str = "64392f96daac500b55c543cd";

#[derive(Clone, Builder)]
pub struct Bhashini {
    #[builder(into)]
    pub(crate) user_id: String,
    #[builder(into)]
    pub(crate) api_key: String,
    #[builder(default = DEFAULT_PIPELINE_ID.to_string(), into)]
    pub(crate) pipeline_id: String,
    /// Sent as `Authorization` on compute calls when present
    #[builder(into)]
    pub(crate) inference_api_key: Option<String>,
    #[builder(default = LanguageTable::builtin())]
    pub(crate) languages: LanguageTable,
    #[builder(default)]
    pub(crate) client: reqwest::Client,
    #[builder(default = COMPUTE_URL.to_string(), into)]
    pub(crate) compute_url: String,
    #[builder(default = PIPELINE_CONFIG_URL.to_string(), into)]
    pub(crate) config_url: String,
}

impl Bhashini {
    /// Create a client for the default pipeline using the built-in language table.
    pub fn new(user_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::builder().user_id(user_id).api_key(api_key).build()
    }

    /// Read `BHASHINI_USER_ID`, `BHASHINI_API_KEY` and the optional
    /// `BHASHINI_PIPELINE_ID` from the environment.
    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        let user_id = std::env::var("BHASHINI_USER_ID")?;
        let api_key = std::env::var("BHASHINI_API_KEY")?;
        let pipeline_id = std::env::var("BHASHINI_PIPELINE_ID").ok();
        Ok(Self::builder()
            .user_id(user_id)
            .api_key(api_key)
            .maybe_pipeline_id(pipeline_id)
            .build())
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    /// Languages available for `task_type` (`asr`, `translation` or `tts`).
    ///
    /// Translation yields a map from each source language to its targets.
    pub fn list_available_languages(
        &self,
        task_type: &str,
    ) -> Result<AvailableLanguages, BhashiniRequestError> {
        let task = TaskType::parse(task_type)?;
        Ok(self.languages.available(task))
    }

    /// Voices TTS offers for `source_language`.
    pub fn get_supported_voices(
        &self,
        source_language: &str,
    ) -> Result<Vec<Gender>, BhashiniRequestError> {
        self.languages.voices(source_language)
    }

    fn request_helper(&self) -> BhashiniRequestHelper<'_> {
        BhashiniRequestHelper::new(
            &self.client,
            &self.user_id,
            &self.api_key,
            self.inference_api_key.as_deref(),
        )
    }
}

impl fmt::Debug for Bhashini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bhashini")
            .field("user_id", &self.user_id)
            .field("api_key", &"[REDACTED]")
            .field("pipeline_id", &self.pipeline_id)
            .field(
                "inference_api_key",
                &self.inference_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("compute_url", &self.compute_url)
            .field("config_url", &self.config_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let client = Bhashini::new("user", "key");
        assert_eq!(client.pipeline_id(), DEFAULT_PIPELINE_ID);
        assert_eq!(client.compute_url, COMPUTE_URL);
        assert_eq!(client.config_url, PIPELINE_CONFIG_URL);
        assert!(client.inference_api_key.is_none());
        assert_eq!(client.languages(), &LanguageTable::builtin());
    }

    #[test]
    fn builder_overrides() {
        let client = Bhashini::builder()
            .user_id("user")
            .api_key("key")
            .pipeline_id("custom")
            .inference_api_key("inference")
            .compute_url("http://localhost:1/compute")
            .languages(LanguageTable::empty())
            .build();
        assert_eq!(client.pipeline_id(), "custom");
        assert_eq!(client.inference_api_key.as_deref(), Some("inference"));
        assert!(client.languages().is_empty());
    }

    #[test]
    fn debug_redacts_keys() {
        let client = Bhashini::builder()
            .user_id("user")
            .api_key("secret-ulca-key")
            .inference_api_key("secret-inference-key")
            .build();
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-ulca-key"));
        assert!(!debug.contains("secret-inference-key"));
    }

    #[test]
    fn list_available_languages_rejects_unknown_task() {
        let client = Bhashini::new("user", "key");
        for task in ["", "nmt", "Translation", "ocr"] {
            assert!(matches!(
                client.list_available_languages(task),
                Err(BhashiniRequestError::InvalidTaskType(t)) if t == task
            ));
        }
        assert!(matches!(
            client.list_available_languages("translation"),
            Ok(AvailableLanguages::Pairs(_))
        ));
    }

    #[test]
    fn supported_voices_for_builtin_languages() {
        let client = Bhashini::new("user", "key");
        let mut voices = client.get_supported_voices("hi").unwrap();
        voices.sort();
        assert_eq!(voices, vec![Gender::Male, Gender::Female]);
        assert!(matches!(
            client.get_supported_voices("fr"),
            Err(BhashiniRequestError::UnsupportedLanguage { .. })
        ));
    }
}
