//! Typed, defaulted views over dot-namespaced call attributes

use std::collections::BTreeSet;

use shared::{AttributeValue, Attributes};

/// Attribute names understood by the request builder
pub mod keys {
    /// Namespace holding every processing attribute
    pub const ROOT: &str = "voicebase";

    pub const PRIORITY: &str = "priority";
    pub const PCI_REDACT: &str = "pciredact";
    pub const NUMBER_REDACT: &str = "numberredact";
    pub const REDACTORS: &str = "redactors";
    pub const DETECTORS: &str = "detectors";
    pub const LANGUAGE: &str = "language";
    pub const LANGUAGE_EXTENSIONS: &str = "extensions";
    pub const ENABLE_ANALYTIC_INDEXING: &str = "enableAnalyticIndexing";
    pub const ENABLE_ALL_CATEGORIES: &str = "enableAllCategories";
    pub const CATEGORY_NAMES: &str = "categoryNames";

    pub const TRANSCRIPT: &str = "transcript";
    pub const TRANSCRIPT_NUMBER_FORMAT: &str = "numberFormat";
    pub const TRANSCRIPT_SWEARWORD_FILTER: &str = "swearFilter";

    pub const KNOWLEDGE: &str = "knowledge";
    pub const KNOWLEDGE_DISCOVERY: &str = "discovery";

    pub const KEYWORDS: &str = "keywords";
    pub const KEYWORDS_GROUPS: &str = "groups";

    pub const CLASSIFIER: &str = "classifier";
    pub const CLASSIFIER_NAMES: &str = "names";

    pub const VOCABULARY: &str = "vocabulary";
    pub const VOCABULARY_TERMS: &str = "terms";
    pub const VOCABULARY_NAMES: &str = "names";

    pub const METRICS: &str = "metrics";
    pub const METRICS_GROUPS: &str = "groups";

    pub const DEFAULT_PCI_REDACTION: bool = false;
    pub const DEFAULT_NUMBER_REDACTION: bool = false;
}

/// Fully namespaced attribute name for a key inside a processing subset,
/// e.g. `voicebase.vocabulary.terms`
pub fn voicebase_attribute_name(subset: &str, key: &str) -> String {
    format!("{}.{subset}.{key}", keys::ROOT)
}

/// Parse a boolean-like token, `None` when it is not recognizably boolean
pub fn parse_boolean(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "y" | "t" | "1" => Some(true),
        "false" | "no" | "off" | "n" | "f" | "0" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated list into trimmed, non-empty entries
pub fn split_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read-only view over the attributes below a namespace prefix
#[derive(Debug, Clone)]
pub struct AttributeExtractor<'a> {
    attributes: &'a Attributes,
    prefix: String,
}

impl<'a> AttributeExtractor<'a> {
    /// View over the whole attribute map
    pub fn new(attributes: &'a Attributes) -> Self {
        Self {
            attributes,
            prefix: String::new(),
        }
    }

    /// View over the processing namespace
    pub fn voicebase(attributes: &'a Attributes) -> Self {
        Self::new(attributes).subset(keys::ROOT)
    }

    /// Narrow the view to `namespace` below the current prefix
    pub fn subset(&self, namespace: &str) -> AttributeExtractor<'a> {
        AttributeExtractor {
            attributes: self.attributes,
            prefix: self.attribute_name(namespace),
        }
    }

    /// Fully namespaced name of `key` in this view
    pub fn attribute_name(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.prefix)
        }
    }

    fn value(&self, key: &str) -> Option<&'a AttributeValue> {
        self.attributes.get(&self.attribute_name(key))
    }

    /// Raw string value, `None` when absent
    pub fn string(&self, key: &str) -> Option<String> {
        match self.value(key)? {
            AttributeValue::Set(items) => Some(items.iter().cloned().collect::<Vec<_>>().join(",")),
            value => value.as_scalar(),
        }
    }

    /// Boolean value, `None` when absent or not boolean-like
    pub fn boolean(&self, key: &str) -> Option<bool> {
        self.value(key)?.as_scalar().and_then(|raw| parse_boolean(&raw))
    }

    /// Boolean value falling back to `default`
    pub fn boolean_or(&self, key: &str, default: bool) -> bool {
        self.boolean(key).unwrap_or(default)
    }

    /// Boolean value falling back to `false`
    pub fn flag(&self, key: &str) -> bool {
        self.boolean_or(key, false)
    }

    /// Comma-separated value as a set.
    ///
    /// `None` means the attribute was not specified; `Some` of an empty set
    /// means it was specified but held no usable entries.
    pub fn string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        match self.value(key)? {
            AttributeValue::Set(items) => Some(
                items
                    .iter()
                    .map(|item| item.trim())
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            value => value.as_scalar().map(|raw| split_list(&raw)),
        }
    }

    /// Like [`string_set`](Self::string_set) but empty sets count as absent
    pub fn non_empty_set(&self, key: &str) -> Option<BTreeSet<String>> {
        self.string_set(key).filter(|items| !items.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> Attributes {
        [
            ("voicebase.priority", "HIGH"),
            ("voicebase.pciredact", "Yes"),
            ("voicebase.numberredact", "maybe"),
            ("voicebase.detectors", " Silence, ,PCI ,Silence"),
            ("voicebase.redactors", " , "),
            ("voicebase.transcript.numberFormat", "false"),
            ("other.priority", "LOW"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_subset_scopes_keys() {
        let attrs = attributes();
        let root = AttributeExtractor::new(&attrs);
        let vb = AttributeExtractor::voicebase(&attrs);

        assert_eq!(vb.string(keys::PRIORITY), Some("HIGH".to_string()));
        assert_eq!(root.subset("other").string(keys::PRIORITY), Some("LOW".to_string()));
        assert_eq!(vb.string("missing"), None);
        assert_eq!(
            vb.subset(keys::TRANSCRIPT).attribute_name(keys::TRANSCRIPT_NUMBER_FORMAT),
            "voicebase.transcript.numberFormat"
        );
    }

    #[test]
    fn test_boolean_defaults() {
        let attrs = attributes();
        let vb = AttributeExtractor::voicebase(&attrs);

        assert_eq!(vb.boolean(keys::PCI_REDACT), Some(true));
        assert_eq!(vb.boolean(keys::NUMBER_REDACT), None);
        assert!(vb.boolean_or(keys::NUMBER_REDACT, true));
        assert!(!vb.flag(keys::NUMBER_REDACT));
        assert!(!vb.flag("absent"));
        assert!(vb.boolean_or("absent", true));
        let transcript = vb.subset(keys::TRANSCRIPT);
        assert_eq!(transcript.boolean(keys::TRANSCRIPT_NUMBER_FORMAT), Some(false));
    }

    #[test]
    fn test_string_set_distinguishes_absent_from_empty() {
        let attrs = attributes();
        let vb = AttributeExtractor::voicebase(&attrs);

        let detectors = vb.string_set(keys::DETECTORS).unwrap();
        assert_eq!(detectors.len(), 2);
        assert!(detectors.contains("Silence"));
        assert!(detectors.contains("PCI"));

        assert_eq!(vb.string_set(keys::REDACTORS), Some(BTreeSet::new()));
        assert_eq!(vb.non_empty_set(keys::REDACTORS), None);
        assert_eq!(vb.string_set("classifier.names"), None);
    }

    #[test]
    fn test_normalized_sets_read_back_unchanged() {
        let set: BTreeSet<String> = ["a".to_string(), "b".to_string()].into_iter().collect();
        let attrs = Attributes::new().with("voicebase.vocabulary.terms", set.clone());
        let vocab = AttributeExtractor::voicebase(&attrs).subset(keys::VOCABULARY);

        assert_eq!(vocab.string_set(keys::VOCABULARY_TERMS), Some(set));
        assert_eq!(vocab.string(keys::VOCABULARY_TERMS), Some("a,b".to_string()));
    }

    #[test]
    fn test_scalar_json_values_are_read_as_text() {
        let attrs = Attributes::new()
            .with("voicebase.pciredact", AttributeValue::Other(serde_json::json!(true)))
            .with("voicebase.language", AttributeValue::Other(serde_json::json!(42)))
            .with(
                "voicebase.detectors",
                AttributeValue::Other(serde_json::json!({ "not": "a list" })),
            );
        let vb = AttributeExtractor::voicebase(&attrs);

        assert_eq!(vb.boolean(keys::PCI_REDACT), Some(true));
        assert_eq!(vb.string(keys::LANGUAGE), Some("42".to_string()));
        assert_eq!(vb.string_set(keys::DETECTORS), None);
    }

    #[test]
    fn test_attribute_name_helpers_agree() {
        let attrs = Attributes::new();
        let extractor = AttributeExtractor::voicebase(&attrs).subset(keys::CLASSIFIER);
        assert_eq!(
            extractor.attribute_name(keys::CLASSIFIER_NAMES),
            voicebase_attribute_name(keys::CLASSIFIER, keys::CLASSIFIER_NAMES)
        );
    }

    #[test]
    fn test_parse_boolean_tokens() {
        for token in ["true", "TRUE", " on ", "yes", "1"] {
            assert_eq!(parse_boolean(token), Some(true), "{token}");
        }
        for token in ["false", "Off", "no", "0"] {
            assert_eq!(parse_boolean(token), Some(false), "{token}");
        }
        assert_eq!(parse_boolean(""), None);
        assert_eq!(parse_boolean("enabled"), None);
    }
}
