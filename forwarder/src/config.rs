//! Deployment configuration loaded from environment variables
//!
//! Environment variables:
//! - `VOICEBASE_API_URL`: API root (default `https://apis.voicebase.com/v3`)
//! - `VOICEBASE_API_TOKEN`: bearer token sent with every request
//! - `VOICEBASE_API_TIMEOUT_MS`: request timeout (default 30000)
//! - `VOICEBASE_CALLBACK_URL`, `VOICEBASE_CALLBACK_METHOD`,
//!   `VOICEBASE_CALLBACK_INCLUDES`, `VOICEBASE_CALLBACK_ADDITIONAL_URLS`: callback descriptor
//! - `VOICEBASE_ENABLE_*`, `VOICEBASE_CONFIGURE_SPEAKERS`: feature toggles
//! - `VOICEBASE_SPEAKER_LEFT`, `VOICEBASE_SPEAKER_RIGHT`: channel speaker names
//! - `FORWARDER_LOG_LEVEL`: log level

use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use crate::core::attributes::parse_boolean;
use crate::core::builder::RequestBuilder;
use crate::error::{ForwarderError, ForwarderResult};
use crate::services::callbacks::CallbackSettings;
use crate::types::{FeatureToggles, SpeakerNames};

pub const ENV_API_URL: &str = "VOICEBASE_API_URL";
pub const ENV_API_TOKEN: &str = "VOICEBASE_API_TOKEN";
pub const ENV_API_TIMEOUT_MS: &str = "VOICEBASE_API_TIMEOUT_MS";
pub const ENV_CALLBACK_URL: &str = "VOICEBASE_CALLBACK_URL";
pub const ENV_CALLBACK_METHOD: &str = "VOICEBASE_CALLBACK_METHOD";
pub const ENV_CALLBACK_INCLUDES: &str = "VOICEBASE_CALLBACK_INCLUDES";
pub const ENV_CALLBACK_ADDITIONAL_URLS: &str = "VOICEBASE_CALLBACK_ADDITIONAL_URLS";
pub const ENV_ENABLE_PREDICTIONS: &str = "VOICEBASE_ENABLE_PREDICTIONS";
pub const ENV_ENABLE_KNOWLEDGE_DISCOVERY: &str = "VOICEBASE_ENABLE_KNOWLEDGE_DISCOVERY";
pub const ENV_ENABLE_ADVANCED_PUNCTUATION: &str = "VOICEBASE_ENABLE_ADVANCED_PUNCTUATION";
pub const ENV_ENABLE_ANALYTIC_INDEXING: &str = "VOICEBASE_ENABLE_ANALYTIC_INDEXING";
pub const ENV_ENABLE_CATEGORIZATION: &str = "VOICEBASE_ENABLE_CATEGORIZATION";
pub const ENV_CONFIGURE_SPEAKERS: &str = "VOICEBASE_CONFIGURE_SPEAKERS";
pub const ENV_SPEAKER_LEFT: &str = "VOICEBASE_SPEAKER_LEFT";
pub const ENV_SPEAKER_RIGHT: &str = "VOICEBASE_SPEAKER_RIGHT";
pub const ENV_LOG_LEVEL: &str = "FORWARDER_LOG_LEVEL";

pub const DEFAULT_API_URL: &str = "https://apis.voicebase.com/v3";
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// Complete forwarder configuration
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    pub api_url: Url,
    pub api_token: Option<String>,
    pub request_timeout_ms: u64,
    pub toggles: FeatureToggles,
    pub speakers: SpeakerNames,
    pub callbacks: Option<CallbackSettings>,
    pub log_level: Option<String>,
}

impl ForwarderConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> ForwarderResult<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from key/value pairs
    pub fn from_map(values: &HashMap<String, String>) -> ForwarderResult<Self> {
        Self::from_source(|key| values.get(key).cloned())
    }

    fn from_source<F>(lookup: F) -> ForwarderResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let setting = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url_raw = setting(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_url(ENV_API_URL, &api_url_raw)?;

        let request_timeout_ms = match setting(ENV_API_TIMEOUT_MS) {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ForwarderError::config(format!("{ENV_API_TIMEOUT_MS} = {raw}: {e}"))
            })?,
            None => DEFAULT_API_TIMEOUT_MS,
        };

        let defaults = FeatureToggles::default();
        let flag = |key: &str, default: bool| -> ForwarderResult<bool> {
            match setting(key) {
                Some(raw) => parse_boolean(&raw).ok_or_else(|| {
                    ForwarderError::config(format!("{key} = {raw}: expected a boolean"))
                }),
                None => Ok(default),
            }
        };

        let toggles = FeatureToggles {
            predictions: flag(ENV_ENABLE_PREDICTIONS, defaults.predictions)?,
            knowledge_discovery: flag(
                ENV_ENABLE_KNOWLEDGE_DISCOVERY,
                defaults.knowledge_discovery,
            )?,
            advanced_punctuation: flag(
                ENV_ENABLE_ADVANCED_PUNCTUATION,
                defaults.advanced_punctuation,
            )?,
            analytic_indexing: flag(ENV_ENABLE_ANALYTIC_INDEXING, defaults.analytic_indexing)?,
            categorization: flag(ENV_ENABLE_CATEGORIZATION, defaults.categorization)?,
            speaker_labels: flag(ENV_CONFIGURE_SPEAKERS, defaults.speaker_labels)?,
        };

        let speakers = SpeakerNames {
            left: setting(ENV_SPEAKER_LEFT),
            right: setting(ENV_SPEAKER_RIGHT),
        };

        let callback_url = setting(ENV_CALLBACK_URL);
        if let Some(url) = &callback_url {
            parse_url(ENV_CALLBACK_URL, url)?;
        }
        let additional_urls = setting(ENV_CALLBACK_ADDITIONAL_URLS)
            .map(|raw| csv(&raw))
            .unwrap_or_default();
        for url in &additional_urls {
            parse_url(ENV_CALLBACK_ADDITIONAL_URLS, url)?;
        }

        let callback_settings = CallbackSettings {
            url: callback_url,
            method: setting(ENV_CALLBACK_METHOD),
            includes: setting(ENV_CALLBACK_INCLUDES)
                .map(|raw| csv(&raw))
                .unwrap_or_default(),
            additional_urls,
        };
        let callbacks = callback_settings.has_targets().then_some(callback_settings);

        Ok(Self {
            api_url,
            api_token: setting(ENV_API_TOKEN),
            request_timeout_ms,
            toggles,
            speakers,
            callbacks,
            log_level: setting(ENV_LOG_LEVEL),
        })
    }

    /// Request builder configured for this deployment
    pub fn request_builder(&self) -> RequestBuilder {
        let builder = RequestBuilder::new(self.toggles).with_speakers(self.speakers.clone());
        match &self.callbacks {
            Some(callbacks) => builder.with_callback_provider(Arc::new(callbacks.clone())),
            None => builder,
        }
    }
}

fn parse_url(key: &str, raw: &str) -> ForwarderResult<Url> {
    Url::parse(raw).map_err(|e| ForwarderError::config(format!("{key} = {raw}: {e}")))
}

/// Comma-separated setting as trimmed, non-empty entries in configured order
fn csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
