//! Callback descriptor configured for the deployment

use serde::{Deserialize, Serialize};

use crate::traits::CallbackProvider;

/// Callback descriptor loaded from deployment configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackSettings {
    pub url: Option<String>,
    pub method: Option<String>,
    pub includes: Vec<String>,
    pub additional_urls: Vec<String>,
}

impl CallbackSettings {
    /// Whether there is anywhere to deliver callbacks to
    pub fn has_targets(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.trim().is_empty())
            || !self.additional_urls.is_empty()
    }
}

impl CallbackProvider for CallbackSettings {
    fn callback_url(&self) -> Option<String> {
        self.url.clone()
    }

    fn callback_method(&self) -> Option<String> {
        self.method.clone()
    }

    fn includes(&self) -> Vec<String> {
        self.includes.clone()
    }

    fn additional_callback_urls(&self) -> Vec<String> {
        self.additional_urls.clone()
    }
}
