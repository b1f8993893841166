//! Core types used throughout the forwarding system

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::errors::{SharedError, SharedResult};

/// Processing priority understood by the media API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    /// Resolve a free-text token, `None` when the token is not a known priority
    pub fn lookup(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "normal" => Some(Priority::Normal),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Normal => write!(f, "normal"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// Result sections a callback can ask to have included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IncludeType {
    Transcript,
    Knowledge,
    Metadata,
    Prediction,
    Streams,
    Spotting,
    Metrics,
    Categories,
}

impl IncludeType {
    /// Resolve a free-text token, `None` when the token is not a known include type
    pub fn lookup(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "transcript" => Some(IncludeType::Transcript),
            "knowledge" => Some(IncludeType::Knowledge),
            "metadata" => Some(IncludeType::Metadata),
            "prediction" | "predictions" => Some(IncludeType::Prediction),
            "streams" => Some(IncludeType::Streams),
            "spotting" => Some(IncludeType::Spotting),
            "metrics" => Some(IncludeType::Metrics),
            "categories" => Some(IncludeType::Categories),
            _ => None,
        }
    }
}

impl fmt::Display for IncludeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IncludeType::Transcript => "transcript",
            IncludeType::Knowledge => "knowledge",
            IncludeType::Metadata => "metadata",
            IncludeType::Prediction => "prediction",
            IncludeType::Streams => "streams",
            IncludeType::Spotting => "spotting",
            IncludeType::Metrics => "metrics",
            IncludeType::Categories => "categories",
        };
        write!(f, "{name}")
    }
}

/// HTTP method used to deliver callbacks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Post,
    Put,
}

impl HttpMethod {
    /// Resolve a free-text token, `None` when the token is not a supported method
    pub fn lookup(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
        }
    }
}

/// A single call attribute value
///
/// Attributes arrive as plain strings. After synthesis, list-valued attributes
/// are recorded as the set that was actually applied. Anything else the
/// platform attaches (numbers, booleans, mixed arrays) is kept as `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Set(BTreeSet<String>),
    Nested(serde_json::Map<String, serde_json::Value>),
    Other(serde_json::Value),
}

impl AttributeValue {
    /// String form of a scalar value, `None` for lists and objects
    pub fn as_scalar(&self) -> Option<String> {
        match self {
            AttributeValue::Text(text) => Some(text.clone()),
            AttributeValue::Other(serde_json::Value::Bool(flag)) => Some(flag.to_string()),
            AttributeValue::Other(serde_json::Value::Number(number)) => Some(number.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<BTreeSet<String>> for AttributeValue {
    fn from(value: BTreeSet<String>) -> Self {
        AttributeValue::Set(value)
    }
}

/// Dot-namespaced call attributes attached to a contact record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.0.iter()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Return a copy with the given keys replaced by their normalized values.
    ///
    /// Keys are only ever added or replaced, never removed.
    pub fn rewritten<I>(&self, rewrites: I) -> Self
    where
        I: IntoIterator<Item = (String, AttributeValue)>,
    {
        let mut map = self.0.clone();
        map.extend(rewrites);
        Attributes(map)
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Attributes(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Contact trace record emitted by the telephony platform when a call completes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// External correlation id
    #[serde(rename = "ContactId", default)]
    pub contact_id: String,

    #[serde(rename = "Attributes", default)]
    pub attributes: Attributes,

    /// Remaining record fields, carried through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ContactRecord {
    pub fn new(contact_id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            contact_id: contact_id.into(),
            attributes,
            extra: serde_json::Map::new(),
        }
    }

    /// Parse a record from its JSON form
    pub fn from_json(json: &str) -> SharedResult<Self> {
        serde_json::from_str(json).map_err(|e| SharedError::DeserializationError {
            message: e.to_string(),
        })
    }

    /// Correlation id, `None` when missing or blank
    pub fn correlation_id(&self) -> Option<&str> {
        let id = self.contact_id.trim();
        if id.is_empty() { None } else { Some(id) }
    }

    /// Location of the call recording, if the record carries one
    pub fn recording_location(&self) -> Option<&str> {
        self.extra
            .get("Recording")
            .and_then(|recording| recording.get("Location"))
            .and_then(|location| location.as_str())
            .filter(|location| !location.trim().is_empty())
    }

    /// Copy of this record carrying a different attribute map
    pub fn with_attributes(&self, attributes: Attributes) -> Self {
        Self {
            contact_id: self.contact_id.clone(),
            attributes,
            extra: self.extra.clone(),
        }
    }
}
