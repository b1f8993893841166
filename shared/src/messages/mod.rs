//! Message types exchanged with the media processing API
//!
//! - `configuration`: the nested processing configuration tree
//! - `request`: request envelope, metadata and acceptance response
//! - `failure`: structured error bodies and failure classification

pub mod configuration;
pub mod request;
pub mod failure;

pub use configuration::{
    MediaConfiguration, IngestConfiguration, ChannelConfiguration,
    TranscriptConfiguration, FormattingConfiguration, ContentFilteringConfiguration,
    SpeechModelConfiguration, PredictionConfiguration, DetectorConfiguration,
    ClassifierConfiguration, DetectorParameter, RedactorConfiguration,
    TranscriptRedactorConfiguration, AudioRedactorConfiguration,
    KnowledgeConfiguration, PublishConfiguration, CallbackConfiguration,
    VocabularyConfiguration, VocabularyTermConfiguration, CategoryConfiguration,
    MetricGroupConfiguration, SpottingConfiguration, SpottingGroupConfiguration,
};

pub use request::{MediaProcessingRequest, MediaMetadata, MediaAcceptance};

pub use failure::{ApiFailure, ErrorResponse, ErrorDetail, is_retryable_status};
