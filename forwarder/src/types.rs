//! Forwarder-specific data types

use serde::{Deserialize, Serialize};

/// Deployment-wide capability switches, fixed for the lifetime of a builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureToggles {
    pub predictions: bool,
    pub knowledge_discovery: bool,
    pub advanced_punctuation: bool,
    pub analytic_indexing: bool,
    pub categorization: bool,
    pub speaker_labels: bool,
}

impl FeatureToggles {
    /// Every capability switched on
    pub fn all_enabled() -> Self {
        Self {
            predictions: true,
            knowledge_discovery: true,
            advanced_punctuation: true,
            analytic_indexing: true,
            categorization: true,
            speaker_labels: true,
        }
    }
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            predictions: true,
            knowledge_discovery: false,
            advanced_punctuation: true,
            analytic_indexing: true,
            categorization: true,
            speaker_labels: true,
        }
    }
}

/// Speaker names for the two recorded channels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerNames {
    pub left: Option<String>,
    pub right: Option<String>,
}

