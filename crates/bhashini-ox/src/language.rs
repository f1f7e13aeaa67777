//! Language tables describing which languages each task supports.
//!
//! The adapter owns one immutable [`LanguageTable`]. The built-in table
//! lists the languages the public Bhashini pipeline serves; a table built
//! from pipeline discovery also carries the service ids to route to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{BhashiniRequestError, Gender, TaskType};

/// Languages served by the default pipeline, as ISO-639-1 codes
pub const DEFAULT_LANGUAGES: [&str; 13] = [
    "as", "bn", "en", "gu", "hi", "kn", "ml", "mr", "or", "pa", "ta", "te", "ur",
];

/// Routing information for one language (or language pair) of a task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_script_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_script_code: Option<String>,
    /// Voices a TTS service offers; empty means unrestricted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_voices: Vec<String>,
}

impl ServiceInfo {
    pub fn with_service_id(service_id: impl Into<String>) -> Self {
        Self {
            service_id: Some(service_id.into()),
            ..Self::default()
        }
    }

    /// Genders this service offers, matched case-insensitively.
    ///
    /// A listing that is empty or names no recognizable gender offers both.
    pub fn voices(&self) -> Vec<Gender> {
        let mut voices: Vec<Gender> = self
            .supported_voices
            .iter()
            .filter_map(|voice| voice.trim().to_ascii_lowercase().parse().ok())
            .collect();
        if voices.is_empty() {
            return Gender::all();
        }
        voices.sort();
        voices.dedup();
        voices
    }
}

/// Languages available for a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AvailableLanguages {
    /// Source languages for ASR or TTS
    List(Vec<String>),
    /// Source language to its translation targets
    Pairs(BTreeMap<String, Vec<String>>),
}

impl AvailableLanguages {
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AvailableLanguages::List(list) => Some(list),
            AvailableLanguages::Pairs(_) => None,
        }
    }

    pub fn as_pairs(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            AvailableLanguages::List(_) => None,
            AvailableLanguages::Pairs(pairs) => Some(pairs),
        }
    }
}

/// Supported languages per task, with the services that handle them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTable {
    pub(crate) asr: BTreeMap<String, Vec<ServiceInfo>>,
    pub(crate) translation: BTreeMap<String, BTreeMap<String, Vec<ServiceInfo>>>,
    pub(crate) tts: BTreeMap<String, Vec<ServiceInfo>>,
}

impl LanguageTable {
    /// An empty table; every lookup against it fails
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table: every default language for ASR and TTS, and every
    /// ordered pair of distinct default languages for translation.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for source in DEFAULT_LANGUAGES {
            table.add_asr(source, ServiceInfo::default());
            table.add_tts(source, ServiceInfo::default());
            for target in DEFAULT_LANGUAGES.iter().filter(|t| **t != source) {
                table.add_translation(source, *target, ServiceInfo::default());
            }
        }
        table
    }

    pub fn add_asr(&mut self, language: impl Into<String>, service: ServiceInfo) -> &mut Self {
        self.asr.entry(language.into()).or_default().push(service);
        self
    }

    pub fn add_tts(&mut self, language: impl Into<String>, service: ServiceInfo) -> &mut Self {
        self.tts.entry(language.into()).or_default().push(service);
        self
    }

    pub fn add_translation(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        service: ServiceInfo,
    ) -> &mut Self {
        self.translation
            .entry(source.into())
            .or_default()
            .entry(target.into())
            .or_default()
            .push(service);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.asr.is_empty() && self.translation.is_empty() && self.tts.is_empty()
    }

    /// Languages available for `task`
    pub fn available(&self, task: TaskType) -> AvailableLanguages {
        match task {
            TaskType::Asr => AvailableLanguages::List(self.asr.keys().cloned().collect()),
            TaskType::Tts => AvailableLanguages::List(self.tts.keys().cloned().collect()),
            TaskType::Translation => AvailableLanguages::Pairs(
                self.translation
                    .iter()
                    .map(|(source, targets)| (source.clone(), targets.keys().cloned().collect()))
                    .collect(),
            ),
        }
    }

    /// First ASR service for `language`
    pub fn asr_service(&self, language: &str) -> Result<&ServiceInfo, BhashiniRequestError> {
        first_service(&self.asr, TaskType::Asr, language)
    }

    /// First TTS service for `language`
    pub fn tts_service(&self, language: &str) -> Result<&ServiceInfo, BhashiniRequestError> {
        first_service(&self.tts, TaskType::Tts, language)
    }

    /// First translation service for the `source` to `target` pair
    pub fn translation_service(
        &self,
        source: &str,
        target: &str,
    ) -> Result<&ServiceInfo, BhashiniRequestError> {
        let targets = self.translation.get(source).ok_or_else(|| {
            BhashiniRequestError::UnsupportedLanguage {
                task: TaskType::Translation.label().to_string(),
                language: source.to_string(),
                available: join_keys(self.translation.keys()),
            }
        })?;

        targets
            .get(target)
            .and_then(|services| services.first())
            .ok_or_else(|| BhashiniRequestError::UnsupportedLanguagePair {
                source_language: source.to_string(),
                target_language: target.to_string(),
                available: join_keys(targets.keys()),
            })
    }

    /// Voices offered for TTS in `language`, see [`ServiceInfo::voices`]
    pub fn voices(&self, language: &str) -> Result<Vec<Gender>, BhashiniRequestError> {
        Ok(self.tts_service(language)?.voices())
    }
}

fn first_service<'a>(
    services: &'a BTreeMap<String, Vec<ServiceInfo>>,
    task: TaskType,
    language: &str,
) -> Result<&'a ServiceInfo, BhashiniRequestError> {
    services
        .get(language)
        .and_then(|entries| entries.first())
        .ok_or_else(|| BhashiniRequestError::UnsupportedLanguage {
            task: task.label().to_string(),
            language: language.to_string(),
            available: join_keys(services.keys()),
        })
}

fn join_keys<'a>(keys: impl Iterator<Item = &'a String>) -> String {
    keys.map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_default_languages() {
        let table = LanguageTable::builtin();
        let asr = table.available(TaskType::Asr);
        let list = asr.as_list().unwrap();
        assert_eq!(list.len(), DEFAULT_LANGUAGES.len());
        assert!(list.iter().all(|code| DEFAULT_LANGUAGES.contains(&code.as_str())));

        let translation = table.available(TaskType::Translation);
        let pairs = translation.as_pairs().unwrap();
        assert_eq!(pairs["hi"].len(), DEFAULT_LANGUAGES.len() - 1);
        assert!(!pairs["hi"].contains(&"hi".to_string()));
        assert!(pairs["hi"].contains(&"en".to_string()));
    }

    #[test]
    fn unknown_language_lists_alternatives() {
        let mut table = LanguageTable::empty();
        table.add_asr("hi", ServiceInfo::with_service_id("asr-hi"));
        table.add_asr("ta", ServiceInfo::with_service_id("asr-ta"));

        let err = table.asr_service("fr").unwrap_err();
        match err {
            BhashiniRequestError::UnsupportedLanguage { task, language, available } => {
                assert_eq!(task, "ASR");
                assert_eq!(language, "fr");
                assert_eq!(available, "hi, ta");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn translation_pair_lookup() {
        let mut table = LanguageTable::empty();
        table.add_translation("hi", "gu", ServiceInfo::with_service_id("nmt-1"));

        assert_eq!(
            table.translation_service("hi", "gu").unwrap().service_id.as_deref(),
            Some("nmt-1")
        );
        assert!(matches!(
            table.translation_service("hi", "ta"),
            Err(BhashiniRequestError::UnsupportedLanguagePair { available, .. }) if available == "gu"
        ));
        assert!(matches!(
            table.translation_service("gu", "hi"),
            Err(BhashiniRequestError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn first_service_wins() {
        let mut table = LanguageTable::empty();
        table
            .add_tts("hi", ServiceInfo::with_service_id("first"))
            .add_tts("hi", ServiceInfo::with_service_id("second"));
        assert_eq!(table.tts_service("hi").unwrap().service_id.as_deref(), Some("first"));
    }

    #[test]
    fn voices_follow_service_listing() {
        let mut table = LanguageTable::empty();
        table.add_tts("hi", ServiceInfo::default());
        table.add_tts(
            "mr",
            ServiceInfo {
                supported_voices: vec!["female".into(), "female".into(), "child".into()],
                ..ServiceInfo::default()
            },
        );

        assert_eq!(table.voices("hi").unwrap(), vec![Gender::Male, Gender::Female]);
        assert_eq!(table.voices("mr").unwrap(), vec![Gender::Female]);
        assert!(table.voices("en").is_err());
    }

    #[test]
    fn voices_listing_is_case_insensitive() {
        let mut table = LanguageTable::empty();
        table.add_tts(
            "gu",
            ServiceInfo {
                supported_voices: vec!["Male".into(), "FEMALE".into()],
                ..ServiceInfo::default()
            },
        );
        table.add_tts(
            "ta",
            ServiceInfo {
                supported_voices: vec![" Female ".into()],
                ..ServiceInfo::default()
            },
        );

        assert_eq!(table.voices("gu").unwrap(), vec![Gender::Male, Gender::Female]);
        assert_eq!(table.voices("ta").unwrap(), vec![Gender::Female]);
    }

    #[test]
    fn unrecognized_voice_names_offer_both_genders() {
        let mut table = LanguageTable::empty();
        table.add_tts(
            "kn",
            ServiceInfo {
                supported_voices: vec!["anushka".into(), "vidya".into()],
                ..ServiceInfo::default()
            },
        );

        assert_eq!(table.voices("kn").unwrap(), Gender::all());
    }
}
