//! Media processing configuration tree
//!
//! Mirrors the JSON document accepted by the media API. Sections that are
//! always sent are plain fields; optional sections are `Option` and are left
//! out of the serialized form when unset.

use serde::{Deserialize, Serialize};

use crate::types::{HttpMethod, IncludeType, Priority};

/// Top-level processing configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaConfiguration {
    pub ingest: IngestConfiguration,
    pub transcript: TranscriptConfiguration,
    pub speech_model: SpeechModelConfiguration,
    pub prediction: PredictionConfiguration,
    pub knowledge: KnowledgeConfiguration,
    pub publish: PublishConfiguration,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabularies: Option<Vec<VocabularyConfiguration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryConfiguration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<MetricGroupConfiguration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotting: Option<SpottingConfiguration>,
}

/// Channel and speaker setup
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngestConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<ChannelConfiguration>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_name: Option<String>,
}

/// Transcript formatting and content filtering
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<FormattingConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_filtering: Option<ContentFilteringConfiguration>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormattingConfiguration {
    pub enable_number_formatting: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentFilteringConfiguration {
    pub enable_profanity_filtering: bool,
}

/// Language model selection and speech features
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpeechModelConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Detectors and classifiers to run against the call
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detectors: Option<Vec<DetectorConfiguration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifiers: Option<Vec<ClassifierConfiguration>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectorConfiguration {
    pub detector_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<DetectorParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redactor: Option<RedactorConfiguration>,
}

impl DetectorConfiguration {
    pub fn new(detector_name: impl Into<String>) -> Self {
        Self {
            detector_name: detector_name.into(),
            parameters: Vec::new(),
            redactor: None,
        }
    }

    pub fn is_redacting(&self) -> bool {
        self.redactor.is_some()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectorParameter {
    pub parameter: String,
    pub value: String,
}

/// What to do with a detected span
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RedactorConfiguration {
    pub transcript: TranscriptRedactorConfiguration,
    pub audio: AudioRedactorConfiguration,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRedactorConfiguration {
    pub replacement: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AudioRedactorConfiguration {
    /// Tone frequency in Hz
    pub tone: u32,
    pub gain: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfiguration {
    pub classifier_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeConfiguration {
    pub enable_discovery: bool,
}

/// Result delivery
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublishConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callbacks: Option<Vec<CallbackConfiguration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_analytic_indexing: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallbackConfiguration {
    pub url: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub include: Vec<IncludeType>,
}

/// Custom vocabulary: either a named stored vocabulary or inline terms
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<VocabularyTermConfiguration>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyTermConfiguration {
    pub term: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_categories: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricGroupConfiguration {
    pub metric_group_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpottingConfiguration {
    pub groups: Vec<SpottingGroupConfiguration>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpottingGroupConfiguration {
    pub group_name: String,
}
