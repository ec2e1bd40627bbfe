use serde::{Deserialize, Serialize};
use tone_config::AnalyzerConfig;
use tracing::debug;

use crate::classify::{self, Signals};
use crate::corpus::{AnalyzerError, MessageCorpus};
use crate::features::Features;
use crate::labels::{
    ClosingStyle, Conciseness, Confidence, ConflictStyle, DiscourseMarkers, Emotion, Empathy,
    Energy, FeedbackStyle, Formality, GreetingStyle, Humor, InterruptionStyle, Politeness,
    QuestionStyle, ResponsePattern, SentenceComplexity, Technicality, VocabularyLevel,
};
use crate::metrics::Metrics;
use crate::personalization::Personalization;
use crate::validation::{ValidationReport, validate_profile};

/// Communication-style profile of one person, derived from one corpus.
///
/// A profile is never updated in place: a changed corpus produces a new
/// profile.  Field order follows the report sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneProfile {
    // core communication style
    pub formality: Formality,
    pub politeness: Politeness,
    pub emotion: Emotion,
    pub conciseness: Conciseness,
    pub energy: Energy,

    // personality traits
    pub humor: Humor,
    pub technicality: Technicality,
    pub empathy: Empathy,
    pub confidence: Confidence,

    // communication patterns
    pub question_style: QuestionStyle,
    pub greeting_style: GreetingStyle,
    pub closing_style: ClosingStyle,
    pub interruption_style: InterruptionStyle,
    pub response_pattern: ResponsePattern,

    // linguistic characteristics
    pub vocabulary_level: VocabularyLevel,
    pub sentence_complexity: SentenceComplexity,
    pub discourse_markers: DiscourseMarkers,

    // personalization
    pub signature_phrases: Vec<String>,
    pub common_words: Vec<String>,
    pub avoided_words: Vec<String>,
    pub communication_quirks: Vec<String>,

    // behavioral patterns
    pub conflict_style: ConflictStyle,
    pub feedback_style: FeedbackStyle,

    pub metrics: Metrics,
}

impl ToneProfile {
    /// Check this profile against the closed label sets and metric ranges.
    pub fn validate(&self) -> ValidationReport {
        match serde_json::to_value(self) {
            Ok(value) => validate_profile(&value),
            Err(err) => ValidationReport::rejected("profile", err.to_string()),
        }
    }
}

impl Default for ToneProfile {
    /// Neutral baseline profile; always passes validation.
    fn default() -> Self {
        Self {
            formality: Formality::SemiFormal,
            politeness: Politeness::Direct,
            emotion: Emotion::Neutral,
            conciseness: Conciseness::Concise,
            energy: Energy::Moderate,
            humor: Humor::None,
            technicality: Technicality::NonTechnical,
            empathy: Empathy::Moderate,
            confidence: Confidence::Moderate,
            question_style: QuestionStyle::Clarifying,
            greeting_style: GreetingStyle::Casual,
            closing_style: ClosingStyle::None,
            interruption_style: InterruptionStyle::Moderate,
            response_pattern: ResponsePattern::Deliberate,
            vocabulary_level: VocabularyLevel::Intermediate,
            sentence_complexity: SentenceComplexity::Moderate,
            discourse_markers: DiscourseMarkers::Moderate,
            signature_phrases: Vec::new(),
            common_words: Vec::new(),
            avoided_words: Vec::new(),
            communication_quirks: Vec::new(),
            conflict_style: ConflictStyle::Collaborative,
            feedback_style: FeedbackStyle::Constructive,
            metrics: Metrics::default(),
        }
    }
}

/// Builds profiles from message corpora.
///
/// Holds only the miner tunables; generation itself is pure, so one generator
/// can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ProfileGenerator {
    config: AnalyzerConfig,
}

impl ProfileGenerator {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Run extraction, aggregation, every classifier and the miner once.
    pub fn generate(&self, corpus: &MessageCorpus) -> ToneProfile {
        let features = Features::extract(corpus);
        let metrics = Metrics::from_features(&features);
        let signals = Signals::new(&features, &metrics);
        let personalization = Personalization::mine(corpus, &features, &self.config);

        debug!(
            messages = features.message_count,
            sentences = features.sentence_count,
            words = features.word_count,
            "generated tone profile"
        );

        ToneProfile {
            formality: classify::FORMALITY.classify(&signals),
            politeness: classify::POLITENESS.classify(&signals),
            emotion: classify::EMOTION.classify(&signals),
            conciseness: classify::CONCISENESS.classify(&signals),
            energy: classify::ENERGY.classify(&signals),
            humor: classify::HUMOR.classify(&signals),
            technicality: classify::TECHNICALITY.classify(&signals),
            empathy: classify::EMPATHY.classify(&signals),
            confidence: classify::CONFIDENCE.classify(&signals),
            question_style: classify::QUESTION_STYLE.classify(&signals),
            greeting_style: classify::GREETING_STYLE.classify(&signals),
            closing_style: classify::CLOSING_STYLE.classify(&signals),
            interruption_style: classify::interruption_style(&signals),
            response_pattern: classify::RESPONSE_PATTERN.classify(&signals),
            vocabulary_level: classify::VOCABULARY_LEVEL.classify(&signals),
            sentence_complexity: classify::SENTENCE_COMPLEXITY.classify(&signals),
            discourse_markers: classify::DISCOURSE_MARKERS.classify(&signals),
            signature_phrases: personalization.signature_phrases,
            common_words: personalization.common_words,
            avoided_words: personalization.avoided_words,
            communication_quirks: personalization.communication_quirks,
            conflict_style: classify::CONFLICT_STYLE.classify(&signals),
            feedback_style: classify::FEEDBACK_STYLE.classify(&signals),
            metrics,
        }
    }

    pub fn generate_from<I, S>(&self, messages: I) -> Result<ToneProfile, AnalyzerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let corpus = MessageCorpus::new(messages)?;
        Ok(self.generate(&corpus))
    }
}

/// Generate a profile with the default analyzer settings.
pub fn generate_profile<I, S>(messages: I) -> Result<ToneProfile, AnalyzerError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ProfileGenerator::default().generate_from(messages)
}
