use serde::{Deserialize, Serialize};

use crate::features::Features;
use crate::patterns::Detector;

/// Flat numeric summary of a corpus.
///
/// Message-normalised fields are `count / messages` and may exceed 1 (three
/// exclamation marks per message is a rate of 3).  Sentence-normalised fields
/// (`complexSentenceRate`, `passiveVoiceRate`) are `count / sentences` and are
/// 0 when the corpus has no terminated sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub contraction_rate: f64,
    pub slang_rate: f64,
    pub emoji_rate: f64,
    pub polite_marker_rate: f64,
    pub imperative_rate: f64,
    /// Lexicon score without the emoji adjustment.  Always integral.
    pub sentiment_score: f64,
    pub avg_tokens: f64,
    pub std_dev_tokens: f64,
    pub exclamation_rate: f64,
    pub caps_rate: f64,
    pub question_rate: f64,
    pub interjection_rate: f64,
    pub repetition_rate: f64,
    pub vocabulary_diversity: f64,
    pub avg_sentence_length: f64,
    pub complex_sentence_rate: f64,
    pub passive_voice_rate: f64,
    pub first_person_rate: f64,
    pub second_person_rate: f64,
    pub third_person_rate: f64,
    pub uncertainty_markers: f64,
    pub confidence_markers: f64,
    pub humor_indicators: f64,
    pub technical_term_rate: f64,
    pub empathy_markers: f64,
    pub time_markers: f64,
    pub spatial_markers: f64,
}

/// Declared value range of a metric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricRange {
    /// Within `[0, 1]`.
    Proportion,
    /// Within `[0, ∞)`.
    NonNegative,
    /// Any finite integer value.
    SignedInteger,
}

impl MetricRange {
    pub fn contains(self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            Self::Proportion => (0.0..=1.0).contains(&value),
            Self::NonNegative => value >= 0.0,
            Self::SignedInteger => value.fract() == 0.0,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Proportion => "a number between 0 and 1",
            Self::NonNegative => "a non-negative number",
            Self::SignedInteger => "an integer",
        }
    }
}

/// Serialized field name and declared range of every metric, in field order.
pub const METRIC_RANGES: &[(&str, MetricRange)] = &[
    ("contractionRate", MetricRange::NonNegative),
    ("slangRate", MetricRange::NonNegative),
    ("emojiRate", MetricRange::NonNegative),
    ("politeMarkerRate", MetricRange::NonNegative),
    ("imperativeRate", MetricRange::NonNegative),
    ("sentimentScore", MetricRange::SignedInteger),
    ("avgTokens", MetricRange::NonNegative),
    ("stdDevTokens", MetricRange::NonNegative),
    ("exclamationRate", MetricRange::NonNegative),
    ("capsRate", MetricRange::NonNegative),
    ("questionRate", MetricRange::NonNegative),
    ("interjectionRate", MetricRange::NonNegative),
    ("repetitionRate", MetricRange::NonNegative),
    ("vocabularyDiversity", MetricRange::Proportion),
    ("avgSentenceLength", MetricRange::NonNegative),
    ("complexSentenceRate", MetricRange::NonNegative),
    ("passiveVoiceRate", MetricRange::NonNegative),
    ("firstPersonRate", MetricRange::NonNegative),
    ("secondPersonRate", MetricRange::NonNegative),
    ("thirdPersonRate", MetricRange::NonNegative),
    ("uncertaintyMarkers", MetricRange::NonNegative),
    ("confidenceMarkers", MetricRange::NonNegative),
    ("humorIndicators", MetricRange::NonNegative),
    ("technicalTermRate", MetricRange::NonNegative),
    ("empathyMarkers", MetricRange::NonNegative),
    ("timeMarkers", MetricRange::NonNegative),
    ("spatialMarkers", MetricRange::NonNegative),
];

impl Metrics {
    pub fn from_features(features: &Features) -> Self {
        // A corpus is never empty, so the message divisor is at least 1.
        let messages = features.message_count.max(1) as f64;
        let per_message = |detector: Detector| features.count(detector) as f64 / messages;
        let per_sentence = |detector: Detector| ratio(features.count(detector), features.sentence_count);

        Self {
            contraction_rate: per_message(Detector::Contraction),
            slang_rate: per_message(Detector::Slang),
            emoji_rate: per_message(Detector::Emoji),
            polite_marker_rate: per_message(Detector::PoliteMarker),
            imperative_rate: per_message(Detector::Imperative),
            sentiment_score: features.sentiment_score() as f64,
            avg_tokens: features.sentence_tokens.mean,
            std_dev_tokens: features.sentence_tokens.std_dev,
            exclamation_rate: per_message(Detector::ExclamationMark),
            caps_rate: per_message(Detector::CapsWord),
            question_rate: per_message(Detector::QuestionMark),
            interjection_rate: per_message(Detector::Interjection),
            repetition_rate: per_message(Detector::WordRepetition),
            vocabulary_diversity: ratio(features.vocabulary_unique, features.vocabulary_total),
            avg_sentence_length: features.sentence_tokens.mean,
            complex_sentence_rate: per_sentence(Detector::ComplexPunctuation),
            passive_voice_rate: per_sentence(Detector::PassiveVoice),
            first_person_rate: per_message(Detector::FirstPerson),
            second_person_rate: per_message(Detector::SecondPerson),
            third_person_rate: per_message(Detector::ThirdPerson),
            uncertainty_markers: per_message(Detector::Uncertainty),
            confidence_markers: per_message(Detector::Confidence),
            humor_indicators: per_message(Detector::Humor),
            technical_term_rate: per_message(Detector::Technical),
            empathy_markers: per_message(Detector::Empathy),
            time_markers: per_message(Detector::TimeMarker),
            spatial_markers: per_message(Detector::SpatialMarker),
        }
    }
}

impl Default for Metrics {
    /// Neutral baseline used by [`crate::ToneProfile::default`].
    fn default() -> Self {
        Self {
            contraction_rate: 0.5,
            slang_rate: 0.0,
            emoji_rate: 0.1,
            polite_marker_rate: 0.5,
            imperative_rate: 0.3,
            sentiment_score: 0.0,
            avg_tokens: 10.0,
            std_dev_tokens: 5.0,
            exclamation_rate: 0.1,
            caps_rate: 0.05,
            question_rate: 0.2,
            interjection_rate: 0.1,
            repetition_rate: 0.0,
            vocabulary_diversity: 0.7,
            avg_sentence_length: 12.0,
            complex_sentence_rate: 0.3,
            passive_voice_rate: 0.2,
            first_person_rate: 0.5,
            second_person_rate: 0.3,
            third_person_rate: 0.2,
            uncertainty_markers: 0.0,
            confidence_markers: 0.0,
            humor_indicators: 0.0,
            technical_term_rate: 0.0,
            empathy_markers: 0.0,
            time_markers: 0.0,
            spatial_markers: 0.0,
        }
    }
}

/// `numerator / denominator`, or 0 when the denominator is 0.
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
