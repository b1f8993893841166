//! Forwarder trait definitions for dependency injection

use async_trait::async_trait;

use shared::{ApiFailure, MediaAcceptance, MediaProcessingRequest};

/// Client submitting synthesized requests to the media API
#[mockall::automock]
#[async_trait]
pub trait MediaClient: Send + Sync {
    /// Submit a request, returning the accepted media or a classified failure
    async fn submit(&self, request: &MediaProcessingRequest) -> Result<MediaAcceptance, ApiFailure>;
}

/// Source of the callback descriptor applied to every request
#[mockall::automock]
pub trait CallbackProvider: Send + Sync {
    /// Primary callback URL, may be blank
    fn callback_url(&self) -> Option<String>;

    /// HTTP method token for all callbacks
    fn callback_method(&self) -> Option<String>;

    /// Free-text include tokens
    fn includes(&self) -> Vec<String>;

    /// Extra callback URLs sharing the primary's method and includes
    fn additional_callback_urls(&self) -> Vec<String>;
}
