//! Contact record factories for tests

#![allow(dead_code)]

use forwarder::{FeatureToggles, RequestBuilder};
use shared::{Attributes, ContactRecord};

pub const CONTACT_ID: &str = "7f1c2a9e-5b1d-4c0e-9a7e-2f5d3c4b1a00";

/// Namespaced processing attribute name, `vb("priority")` -> `voicebase.priority`
pub fn vb(key: &str) -> String {
    format!("voicebase.{key}")
}

/// Attributes from `(key, value)` pairs, keys given without the namespace
pub fn voicebase_attributes(pairs: &[(&str, &str)]) -> Attributes {
    pairs.iter().map(|(key, value)| (vb(key), *value)).collect()
}

/// Record with the default contact id and the given processing attributes
pub fn call_record(pairs: &[(&str, &str)]) -> ContactRecord {
    ContactRecord::new(CONTACT_ID, voicebase_attributes(pairs))
}

/// Record as the telephony platform emits it, with a recording and
/// attributes unrelated to processing
pub fn recorded_call_json() -> String {
    format!(
        r#"{{
            "ContactId": "{CONTACT_ID}",
            "Channel": "VOICE",
            "InitiationMethod": "INBOUND",
            "Recording": {{
                "Location": "https://recordings.example.com/2024/05/01/{CONTACT_ID}.wav",
                "Type": "AUDIO"
            }},
            "Attributes": {{
                "customerTier": "gold",
                "voicebase.priority": "high",
                "voicebase.pciredact": "true",
                "voicebase.keywords.groups": "billing, cancellation , billing",
                "voicebase.vocabulary.terms": "ACME Plus,Turbo Saver"
            }}
        }}"#
    )
}

/// Builder with every deployment feature switched on
pub fn all_enabled_builder() -> RequestBuilder {
    RequestBuilder::new(FeatureToggles::all_enabled())
}

/// Builder with the default deployment toggles
pub fn default_builder() -> RequestBuilder {
    RequestBuilder::new(FeatureToggles::default())
}
