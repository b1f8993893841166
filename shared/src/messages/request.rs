//! Request envelope submitted to the media API

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};
use crate::messages::configuration::MediaConfiguration;
use crate::types::ContactRecord;

/// Correlation data carried through to the remote side for auditing
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    pub external_id: String,
    /// The contact record with normalized attributes
    pub extended: ContactRecord,
}

/// A fully synthesized processing request
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaProcessingRequest {
    pub configuration: MediaConfiguration,
    pub metadata: MediaMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl MediaProcessingRequest {
    pub fn external_id(&self) -> &str {
        &self.metadata.external_id
    }

    pub fn configuration_json(&self) -> SharedResult<String> {
        serde_json::to_string(&self.configuration).map_err(|e| SharedError::SerializationError {
            message: format!("configuration: {e}"),
        })
    }

    pub fn metadata_json(&self) -> SharedResult<String> {
        serde_json::to_string(&self.metadata).map_err(|e| SharedError::SerializationError {
            message: format!("metadata: {e}"),
        })
    }
}

/// Response returned by the media API once a request is accepted
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaAcceptance {
    pub media_id: String,
    #[serde(default)]
    pub status: Option<String>,
}
