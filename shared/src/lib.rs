//! Shared types for the contact-center forwarding system
//!
//! Contains the inbound contact record model, the outbound media processing
//! request model and the classified API failure shared by every component.

pub mod types;
pub mod errors;
pub mod logging;
pub mod messages;

pub use types::*;
pub use errors::*;

pub use messages::{
    // Request configuration tree
    MediaConfiguration, IngestConfiguration, ChannelConfiguration,
    TranscriptConfiguration, FormattingConfiguration, ContentFilteringConfiguration,
    SpeechModelConfiguration, PredictionConfiguration, DetectorConfiguration,
    ClassifierConfiguration, DetectorParameter, RedactorConfiguration,
    TranscriptRedactorConfiguration, AudioRedactorConfiguration,
    KnowledgeConfiguration, PublishConfiguration, CallbackConfiguration,
    VocabularyConfiguration, VocabularyTermConfiguration, CategoryConfiguration,
    MetricGroupConfiguration, SpottingConfiguration, SpottingGroupConfiguration,

    // Request envelope and responses
    MediaProcessingRequest, MediaMetadata, MediaAcceptance,

    // Failure classification
    ApiFailure, ErrorResponse, ErrorDetail, is_retryable_status,
};
