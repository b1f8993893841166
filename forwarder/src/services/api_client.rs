//! Media API client over HTTP

use async_trait::async_trait;
use reqwest::multipart::Form;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use shared::{ApiFailure, ErrorResponse, MediaAcceptance, MediaProcessingRequest};
use shared::messages::failure::BAD_REQUEST_STATUS;
use crate::error::{ForwarderError, ForwarderResult};
use crate::traits::MediaClient;

/// Longest raw error body kept on a failure without a structured error
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Real media client posting multipart requests to `{api_url}/media`
pub struct RealMediaClient {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl RealMediaClient {
    /// Create a client for the API rooted at `api_url`
    pub fn new(api_url: &Url, api_token: Option<String>, timeout_ms: u64) -> ForwarderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ForwarderError::config(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            client,
            endpoint: media_endpoint(api_url),
            api_token,
        })
    }

    fn build_form(request: &MediaProcessingRequest) -> Result<Form, ApiFailure> {
        // A request we cannot encode will not encode on retry either
        let encode_failure = |e: shared::SharedError| {
            ApiFailure::new(BAD_REQUEST_STATUS).with_message(e.to_string())
        };

        let mut form = Form::new()
            .text("configuration", request.configuration_json().map_err(encode_failure)?)
            .text("metadata", request.metadata_json().map_err(encode_failure)?);
        if let Some(media_url) = &request.media_url {
            form = form.text("mediaUrl", media_url.clone());
        }
        Ok(form)
    }

    async fn failure_from_response(response: reqwest::Response) -> ApiFailure {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(error) => ApiFailure::new(status).with_error(error),
            Err(_) if body.trim().is_empty() => ApiFailure::new(status),
            Err(_) => {
                let message: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
                ApiFailure::new(status).with_message(message)
            }
        }
    }
}

/// Media collection endpoint below the API root
pub fn media_endpoint(api_url: &Url) -> String {
    format!("{}/media", api_url.as_str().trim_end_matches('/'))
}

#[async_trait]
impl MediaClient for RealMediaClient {
    async fn submit(
        &self,
        request: &MediaProcessingRequest,
    ) -> Result<MediaAcceptance, ApiFailure> {
        let form = Self::build_form(request)?;

        debug!("📤 Submitting media for {} to {}", request.external_id(), self.endpoint);

        let mut http_request = self.client.post(&self.endpoint).multipart(form);
        if let Some(token) = &self.api_token {
            http_request = http_request.bearer_auth(token);
        }

        let response = http_request.send().await.map_err(|e| {
            warn!("Media submission for {} did not complete: {}", request.external_id(), e);
            match e.status() {
                Some(status) => ApiFailure::new(status.as_u16()).with_message(e.to_string()),
                None => ApiFailure::network(e.to_string()),
            }
        })?;

        if !response.status().is_success() {
            return Err(Self::failure_from_response(response).await);
        }

        let status = response.status().as_u16();
        response.json::<MediaAcceptance>().await.map_err(|e| {
            ApiFailure::new(status).with_message(format!("unreadable acceptance body: {e}"))
        })
    }
}
