use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::BhashiniRequestError;

/// Task types understood by the Bhashini pipeline
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskType {
    Asr,
    Translation,
    Tts,
}

impl TaskType {
    /// Parse a task type, failing with `InvalidTaskType` for anything else
    pub fn parse(value: &str) -> Result<Self, BhashiniRequestError> {
        value
            .parse()
            .map_err(|_| BhashiniRequestError::InvalidTaskType(value.to_string()))
    }

    /// Human readable label used in error messages
    pub fn label(self) -> &'static str {
        match self {
            TaskType::Asr => "ASR",
            TaskType::Translation => "Translation",
            TaskType::Tts => "TTS",
        }
    }
}

/// Audio container formats accepted by the ASR service
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Wav,
    Mp3,
    Flac,
    Ogg,
}

impl AudioFormat {
    pub fn parse(value: &str) -> Result<Self, BhashiniRequestError> {
        value
            .parse()
            .map_err(|_| BhashiniRequestError::UnsupportedFormat(value.to_string()))
    }
}

/// Sampling rates accepted by the ASR and TTS services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum SamplingRate {
    Hz8000,
    Hz16000,
    Hz48000,
}

impl SamplingRate {
    pub fn hz(self) -> u32 {
        match self {
            SamplingRate::Hz8000 => 8000,
            SamplingRate::Hz16000 => 16000,
            SamplingRate::Hz48000 => 48000,
        }
    }

    pub fn parse(hz: u32) -> Result<Self, BhashiniRequestError> {
        Self::iter()
            .find(|rate| rate.hz() == hz)
            .ok_or(BhashiniRequestError::UnsupportedSamplingRate(hz))
    }
}

impl TryFrom<u32> for SamplingRate {
    type Error = BhashiniRequestError;

    fn try_from(hz: u32) -> Result<Self, Self::Error> {
        Self::parse(hz)
    }
}

impl From<SamplingRate> for u32 {
    fn from(rate: SamplingRate) -> Self {
        rate.hz()
    }
}

impl Serialize for SamplingRate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.hz())
    }
}

/// Voice gender for TTS
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    #[default]
    Female,
}

impl Gender {
    /// Both voices, which every built-in TTS language offers
    pub fn all() -> Vec<Gender> {
        Self::iter().collect()
    }
}
