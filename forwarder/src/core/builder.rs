//! Media processing request synthesis
//!
//! Turns the loosely typed attributes of a contact record into a complete
//! `MediaConfiguration`, honoring the deployment feature toggles. Malformed
//! per-call values never fail the build: they are logged and replaced by the
//! documented default.
//!
//! List-valued attributes that were applied are recorded back into the
//! metadata copy of the record in their normalized (set) form, so the remote
//! side sees what was actually requested. The caller's record is not touched.

use std::collections::BTreeMap;
use std::sync::Arc;

use shared::{contact_debug, contact_info, contact_warn};
use shared::{
    AttributeValue, AudioRedactorConfiguration, CallbackConfiguration, CategoryConfiguration,
    ChannelConfiguration, ClassifierConfiguration, ContactRecord, ContentFilteringConfiguration,
    DetectorConfiguration, DetectorParameter, FormattingConfiguration, HttpMethod, IncludeType,
    IngestConfiguration, MediaConfiguration, MediaMetadata, MediaProcessingRequest,
    MetricGroupConfiguration, Priority, RedactorConfiguration, SpottingConfiguration,
    SpottingGroupConfiguration, TranscriptRedactorConfiguration, VocabularyConfiguration,
    VocabularyTermConfiguration,
};

use crate::core::attributes::{AttributeExtractor, keys};
use crate::core::gating::{Gate, gate, override_or};
use crate::traits::CallbackProvider;
use crate::types::{FeatureToggles, SpeakerNames};

pub const SPEECH_FEATURE_VOICE: &str = "voiceFeatures";
pub const SPEECH_FEATURE_ADVANCED_PUNCTUATION: &str = "advancedPunctuation";

pub const DETECTOR_NAME_PCI: &str = "PCI";
pub const DETECTOR_NAME_NUMBER: &str = "Number";
pub const PCI_DETECTION_LEVEL_PARAMETER: &str = "detectionLevel";
pub const PCI_DETECTION_LEVEL_VALUE: &str = "probableNumbers";

pub const REDACTION_REPLACEMENT: &str = "[redacted]";
pub const REDACTION_TONE: u32 = 270;
pub const REDACTION_GAIN: f32 = 0.5;

/// Normalized attribute values to record in the request metadata
type Rewrites = Vec<(String, AttributeValue)>;

/// Redactor applied to every detector marked for redaction
pub fn default_redactor() -> RedactorConfiguration {
    RedactorConfiguration {
        transcript: TranscriptRedactorConfiguration {
            replacement: REDACTION_REPLACEMENT.to_string(),
        },
        audio: AudioRedactorConfiguration {
            tone: REDACTION_TONE,
            gain: REDACTION_GAIN,
        },
    }
}

fn pci_detection_parameter() -> DetectorParameter {
    DetectorParameter {
        parameter: PCI_DETECTION_LEVEL_PARAMETER.to_string(),
        value: PCI_DETECTION_LEVEL_VALUE.to_string(),
    }
}

/// Resolve the priority attribute, falling back to `Normal`
pub fn resolve_priority(raw: Option<&str>, contact_id: &str) -> Priority {
    match raw {
        None => Priority::Normal,
        Some(token) => Priority::lookup(token).unwrap_or_else(|| {
            contact_warn!(
                contact_id,
                "Unknown priority '{}', using {}",
                token,
                Priority::Normal
            );
            Priority::Normal
        }),
    }
}

/// Resolve the callback method token, falling back to `POST`
pub fn resolve_method(raw: Option<&str>, contact_id: &str) -> HttpMethod {
    match raw.map(str::trim).filter(|token| !token.is_empty()) {
        None => HttpMethod::Post,
        Some(token) => HttpMethod::lookup(token).unwrap_or_else(|| {
            contact_warn!(
                contact_id,
                "Unknown callback method '{}', using {}",
                token,
                HttpMethod::Post
            );
            HttpMethod::Post
        }),
    }
}

/// Merge the detector sources into `name -> redact`.
///
/// Sources are applied in order and a name keeps the first decision made
/// for it: PCI redaction flag, number redaction flag, redactor names, then
/// detector names.
pub fn detector_settings(vb: &AttributeExtractor<'_>) -> BTreeMap<String, bool> {
    let mut settings = BTreeMap::new();

    if vb.boolean_or(keys::PCI_REDACT, keys::DEFAULT_PCI_REDACTION) {
        settings.insert(DETECTOR_NAME_PCI.to_string(), true);
    }
    if vb.boolean_or(keys::NUMBER_REDACT, keys::DEFAULT_NUMBER_REDACTION) {
        settings.entry(DETECTOR_NAME_NUMBER.to_string()).or_insert(true);
    }
    for name in vb.string_set(keys::REDACTORS).unwrap_or_default() {
        settings.entry(name).or_insert(true);
    }
    for name in vb.string_set(keys::DETECTORS).unwrap_or_default() {
        settings.entry(name).or_insert(false);
    }

    settings
}

/// Detector list for the merged settings, `None` when there is nothing to detect
pub fn detector_configurations(
    settings: &BTreeMap<String, bool>,
) -> Option<Vec<DetectorConfiguration>> {
    if settings.is_empty() {
        return None;
    }

    let detectors = settings
        .iter()
        .map(|(name, redact)| {
            let mut detector = DetectorConfiguration::new(name.clone());
            if name == DETECTOR_NAME_PCI {
                detector.parameters.push(pci_detection_parameter());
            }
            if *redact {
                detector.redactor = Some(default_redactor());
            }
            detector
        })
        .collect();

    Some(detectors)
}

/// Synthesizes media processing requests from contact records
#[derive(Clone)]
pub struct RequestBuilder {
    toggles: FeatureToggles,
    speakers: SpeakerNames,
    callback_provider: Option<Arc<dyn CallbackProvider>>,
}

impl RequestBuilder {
    pub fn new(toggles: FeatureToggles) -> Self {
        Self {
            toggles,
            speakers: SpeakerNames::default(),
            callback_provider: None,
        }
    }

    pub fn with_speakers(mut self, speakers: SpeakerNames) -> Self {
        self.speakers = speakers;
        self
    }

    pub fn with_callback_provider(mut self, provider: Arc<dyn CallbackProvider>) -> Self {
        self.callback_provider = Some(provider);
        self
    }

    pub fn toggles(&self) -> &FeatureToggles {
        &self.toggles
    }

    /// Build the request for a record.
    ///
    /// The record must carry a contact id; checking that is up to the caller.
    pub fn build(&self, record: &ContactRecord) -> MediaProcessingRequest {
        let contact_id = record.correlation_id().unwrap_or(record.contact_id.as_str());

        let mut configuration = MediaConfiguration::default();
        configuration.ingest = self.ingest_configuration();
        configuration.speech_model.features = self.speech_features();
        configuration.knowledge.enable_discovery = self.toggles.knowledge_discovery;
        configuration.publish.callbacks = self.callback_configurations(contact_id);

        let mut rewrites = Rewrites::new();
        if !record.attributes.is_empty() {
            let vb = AttributeExtractor::voicebase(&record.attributes);
            self.apply_call_attributes(&vb, contact_id, &mut configuration, &mut rewrites);
        }

        contact_debug!(
            contact_id,
            rewrites = rewrites.len(),
            "Synthesized media configuration"
        );

        let attributes = record.attributes.rewritten(rewrites);
        MediaProcessingRequest {
            configuration,
            metadata: MediaMetadata {
                external_id: contact_id.to_string(),
                extended: record.with_attributes(attributes),
            },
            media_url: record.recording_location().map(str::to_string),
        }
    }

    fn ingest_configuration(&self) -> IngestConfiguration {
        if !self.toggles.speaker_labels {
            return IngestConfiguration::default();
        }

        let channels = vec![
            ChannelConfiguration { speaker_name: self.speakers.left.clone() },
            ChannelConfiguration { speaker_name: self.speakers.right.clone() },
        ];
        IngestConfiguration { channels: Some(channels) }
    }

    fn speech_features(&self) -> Vec<String> {
        let mut features = vec![SPEECH_FEATURE_VOICE.to_string()];
        if self.toggles.advanced_punctuation {
            features.push(SPEECH_FEATURE_ADVANCED_PUNCTUATION.to_string());
        }
        features
    }

    fn callback_configurations(&self, contact_id: &str) -> Option<Vec<CallbackConfiguration>> {
        let provider = self.callback_provider.as_ref()?;

        let include: Vec<IncludeType> = provider
            .includes()
            .iter()
            .map(|token| token.trim())
            .filter(|token| !token.is_empty())
            .filter_map(|token| {
                let resolved = IncludeType::lookup(token);
                if resolved.is_none() {
                    contact_warn!(contact_id, "Dropping unknown callback include '{}'", token);
                }
                resolved
            })
            .collect();
        let method = resolve_method(provider.callback_method().as_deref(), contact_id);

        let mut callbacks = Vec::new();
        if let Some(url) = provider.callback_url().filter(|url| !url.trim().is_empty()) {
            callbacks.push(CallbackConfiguration { url, method, include: include.clone() });
        }
        for url in provider.additional_callback_urls() {
            callbacks.push(CallbackConfiguration { url, method, include: include.clone() });
        }

        if callbacks.is_empty() { None } else { Some(callbacks) }
    }

    fn apply_call_attributes(
        &self,
        vb: &AttributeExtractor<'_>,
        contact_id: &str,
        configuration: &mut MediaConfiguration,
        rewrites: &mut Rewrites,
    ) {
        let priority = vb.string(keys::PRIORITY);
        configuration.priority = Some(resolve_priority(priority.as_deref(), contact_id));

        configuration.prediction.detectors = detector_configurations(&detector_settings(vb));

        // transcript
        let transcript = vb.subset(keys::TRANSCRIPT);
        configuration.transcript.formatting = Some(FormattingConfiguration {
            enable_number_formatting: transcript.flag(keys::TRANSCRIPT_NUMBER_FORMAT),
        });
        configuration.transcript.content_filtering = Some(ContentFilteringConfiguration {
            enable_profanity_filtering: transcript.flag(keys::TRANSCRIPT_SWEARWORD_FILTER),
        });

        // knowledge discovery
        let knowledge = vb.subset(keys::KNOWLEDGE);
        configuration.knowledge.enable_discovery = override_or(
            self.toggles.knowledge_discovery,
            knowledge.boolean(keys::KNOWLEDGE_DISCOVERY),
        );

        // phrase spotting
        let keywords = vb.subset(keys::KEYWORDS);
        if let Some(groups) = keywords.non_empty_set(keys::KEYWORDS_GROUPS) {
            configuration.spotting = Some(SpottingConfiguration {
                groups: groups
                    .iter()
                    .map(|name| SpottingGroupConfiguration { group_name: name.clone() })
                    .collect(),
            });
            rewrites.push((keywords.attribute_name(keys::KEYWORDS_GROUPS), groups.into()));
        }

        // language
        configuration.speech_model.language = vb
            .string(keys::LANGUAGE)
            .map(|language| language.trim().to_string())
            .filter(|language| !language.is_empty());
        configuration.speech_model.extensions = vb
            .non_empty_set(keys::LANGUAGE_EXTENSIONS)
            .map(|extensions| extensions.into_iter().collect());

        self.apply_analytic_indexing(vb, contact_id, configuration);
        self.apply_categories(vb, contact_id, configuration);
        self.apply_classifiers(vb, contact_id, configuration, rewrites);
        apply_vocabularies(vb, configuration, rewrites);

        // metrics
        configuration.metrics = vb
            .subset(keys::METRICS)
            .non_empty_set(keys::METRICS_GROUPS)
            .map(|groups| {
                groups
                    .into_iter()
                    .map(|name| MetricGroupConfiguration { metric_group_name: name })
                    .collect()
            });
    }

    fn apply_analytic_indexing(
        &self,
        vb: &AttributeExtractor<'_>,
        contact_id: &str,
        configuration: &mut MediaConfiguration,
    ) {
        let requested = vb.flag(keys::ENABLE_ANALYTIC_INDEXING);
        match gate(self.toggles.analytic_indexing, requested) {
            Gate::Applied => configuration.publish.enable_analytic_indexing = Some(true),
            Gate::Suppressed => {
                contact_info!(
                    contact_id,
                    "Analytic indexing requested but disabled, submitting without it"
                );
            }
            Gate::NotRequested => {}
        }
    }

    fn apply_categories(
        &self,
        vb: &AttributeExtractor<'_>,
        contact_id: &str,
        configuration: &mut MediaConfiguration,
    ) {
        let all_categories = vb.flag(keys::ENABLE_ALL_CATEGORIES);
        let names = vb.non_empty_set(keys::CATEGORY_NAMES);

        match gate(self.toggles.categorization, all_categories || names.is_some()) {
            Gate::Applied => {
                let mut categories = Vec::new();
                if all_categories {
                    categories.push(CategoryConfiguration {
                        all_categories: Some(true),
                        category_name: None,
                    });
                }
                categories.extend(names.into_iter().flatten().map(|name| CategoryConfiguration {
                    all_categories: None,
                    category_name: Some(name),
                }));
                configuration.categories = Some(categories);
            }
            Gate::Suppressed => {
                contact_info!(
                    contact_id,
                    "Categorization requested but disabled, submitting without it"
                );
            }
            Gate::NotRequested => {}
        }
    }

    fn apply_classifiers(
        &self,
        vb: &AttributeExtractor<'_>,
        contact_id: &str,
        configuration: &mut MediaConfiguration,
        rewrites: &mut Rewrites,
    ) {
        let classifier = vb.subset(keys::CLASSIFIER);
        let names = classifier.non_empty_set(keys::CLASSIFIER_NAMES);

        match (gate(self.toggles.predictions, names.is_some()), names) {
            (Gate::Applied, Some(names)) => {
                configuration.prediction.classifiers = Some(
                    names
                        .iter()
                        .map(|name| ClassifierConfiguration { classifier_name: name.clone() })
                        .collect(),
                );
                rewrites.push((classifier.attribute_name(keys::CLASSIFIER_NAMES), names.into()));
            }
            (Gate::Suppressed, _) => {
                contact_debug!(contact_id, "Classifiers requested but predictions are disabled");
            }
            _ => {}
        }
    }
}

fn apply_vocabularies(
    vb: &AttributeExtractor<'_>,
    configuration: &mut MediaConfiguration,
    rewrites: &mut Rewrites,
) {
    let vocabulary = vb.subset(keys::VOCABULARY);
    let mut vocabularies = Vec::new();

    if let Some(terms) = vocabulary.non_empty_set(keys::VOCABULARY_TERMS) {
        vocabularies.push(VocabularyConfiguration {
            vocabulary_name: None,
            terms: Some(
                terms
                    .iter()
                    .map(|term| VocabularyTermConfiguration { term: term.clone() })
                    .collect(),
            ),
        });
        rewrites.push((vocabulary.attribute_name(keys::VOCABULARY_TERMS), terms.into()));
    }

    if let Some(names) = vocabulary.non_empty_set(keys::VOCABULARY_NAMES) {
        vocabularies.extend(names.iter().map(|name| VocabularyConfiguration {
            vocabulary_name: Some(name.clone()),
            terms: None,
        }));
        rewrites.push((vocabulary.attribute_name(keys::VOCABULARY_NAMES), names.into()));
    }

    if !vocabularies.is_empty() {
        configuration.vocabularies = Some(vocabularies);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockCallbackProvider;
    use shared::Attributes;

    fn callback_provider(
        url: Option<&str>,
        method: Option<&str>,
        includes: &[&str],
        additional: &[&str],
    ) -> Arc<dyn CallbackProvider> {
        let mut provider = MockCallbackProvider::new();
        provider.expect_callback_url().return_const(url.map(str::to_string));
        provider.expect_callback_method().return_const(method.map(str::to_string));
        provider
            .expect_includes()
            .return_const(includes.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        provider
            .expect_additional_callback_urls()
            .return_const(additional.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        Arc::new(provider)
    }

    fn record(pairs: &[(&str, &str)]) -> ContactRecord {
        ContactRecord::new("contact-1", pairs.iter().copied().collect::<Attributes>())
    }

    #[test]
    fn test_callbacks_share_method_and_includes() {
        let provider = callback_provider(
            Some("https://callbacks.example.com/primary"),
            Some("put"),
            &["transcript", "bogus", "", "knowledge"],
            &["https://callbacks.example.com/secondary"],
        );
        let builder =
            RequestBuilder::new(FeatureToggles::default()).with_callback_provider(provider);

        let request = builder.build(&record(&[]));
        let callbacks = request.configuration.publish.callbacks.unwrap();

        assert_eq!(callbacks.len(), 2);
        assert_eq!(callbacks[0].url, "https://callbacks.example.com/primary");
        for callback in &callbacks {
            assert_eq!(callback.method, HttpMethod::Put);
            assert_eq!(callback.include, vec![IncludeType::Transcript, IncludeType::Knowledge]);
        }
    }

    #[test]
    fn test_blank_primary_callback_is_skipped() {
        let builder = RequestBuilder::new(FeatureToggles::default())
            .with_callback_provider(callback_provider(Some("   "), None, &[], &[]));
        assert!(builder.build(&record(&[])).configuration.publish.callbacks.is_none());

        let provider = callback_provider(
            Some(""),
            Some("DELETE"),
            &["metadata"],
            &["https://callbacks.example.com/only"],
        );
        let builder =
            RequestBuilder::new(FeatureToggles::default()).with_callback_provider(provider);
        let callbacks = builder.build(&record(&[])).configuration.publish.callbacks.unwrap();
        assert_eq!(callbacks.len(), 1);
        assert_eq!(callbacks[0].method, HttpMethod::Post);
    }

    #[test]
    fn test_detector_sources_keep_first_decision() {
        let attrs: Attributes = [
            ("voicebase.numberredact", "true"),
            ("voicebase.redactors", "SSN, Number"),
            ("voicebase.detectors", "SSN, Number, Silence"),
        ]
        .into_iter()
        .collect();
        let vb = AttributeExtractor::voicebase(&attrs);

        let settings = detector_settings(&vb);
        assert_eq!(settings.get("Number"), Some(&true));
        assert_eq!(settings.get("SSN"), Some(&true));
        assert_eq!(settings.get("Silence"), Some(&false));
        assert_eq!(settings.get("PCI"), None);
    }

    #[test]
    fn test_pci_named_as_detector_gets_parameter_without_redactor() {
        let mut settings = BTreeMap::new();
        settings.insert("PCI".to_string(), false);

        let detectors = detector_configurations(&settings).unwrap();
        assert_eq!(detectors[0].parameters, vec![pci_detection_parameter()]);
        assert!(!detectors[0].is_redacting());
        assert!(detector_configurations(&BTreeMap::new()).is_none());
    }

    #[test]
    fn test_resolve_priority() {
        assert_eq!(resolve_priority(Some("HIGH"), "c"), Priority::High);
        assert_eq!(resolve_priority(Some("urgentish"), "c"), Priority::Normal);
        assert_eq!(resolve_priority(None, "c"), Priority::Normal);
    }

    #[test]
    fn test_speakers_and_features_follow_toggles() {
        let toggles = FeatureToggles {
            advanced_punctuation: false,
            speaker_labels: false,
            ..FeatureToggles::default()
        };
        let request = RequestBuilder::new(toggles).build(&record(&[]));
        assert_eq!(request.configuration.speech_model.features, vec![SPEECH_FEATURE_VOICE]);
        assert!(request.configuration.ingest.channels.is_none());

        let request = RequestBuilder::new(FeatureToggles::default())
            .with_speakers(SpeakerNames { left: Some("Agent".to_string()), right: None })
            .build(&record(&[]));
        let channels = request.configuration.ingest.channels.unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].speaker_name.as_deref(), Some("Agent"));
        assert_eq!(channels[1].speaker_name, None);
        assert_eq!(
            request.configuration.speech_model.features,
            vec![SPEECH_FEATURE_VOICE, SPEECH_FEATURE_ADVANCED_PUNCTUATION]
        );
    }

    #[test]
    fn test_only_applied_lists_are_rewritten() {
        let request = RequestBuilder::new(FeatureToggles::all_enabled()).build(&record(&[
            ("voicebase.keywords.groups", "billing, churn"),
            ("voicebase.classifier.names", "sentiment"),
            ("voicebase.metrics.groups", "overtalk"),
        ]));
        let attributes = &request.metadata.extended.attributes;

        for name in ["voicebase.keywords.groups", "voicebase.classifier.names"] {
            assert!(matches!(attributes.get(name), Some(AttributeValue::Set(_))), "{name}");
        }
        // metric groups are applied but not rewritten
        assert_eq!(
            attributes.get("voicebase.metrics.groups"),
            Some(&AttributeValue::Text("overtalk".to_string()))
        );
    }
}
