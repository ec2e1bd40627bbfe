//! Dimension classifiers as ordered rule tables.
//!
//! Each table is evaluated top to bottom and the first rule whose predicate
//! holds decides the label; when none holds the table default applies.  Two
//! adjacent thresholds can both be true, so table order is significant.
//! Rates are per message unless a rule says otherwise; `N` is the message
//! count.

use crate::features::Features;
use crate::labels::{
    ClosingStyle, Conciseness, Confidence, ConflictStyle, DiscourseMarkers, Emotion, Empathy,
    Energy, FeedbackStyle, Formality, GreetingStyle, Humor, InterruptionStyle, Politeness,
    QuestionStyle, ResponsePattern, SentenceComplexity, Technicality, VocabularyLevel,
};
use crate::metrics::Metrics;
use crate::patterns::Detector;

/// Everything a classifier may look at.
#[derive(Debug, Clone, Copy)]
pub struct Signals<'a> {
    pub features: &'a Features,
    pub metrics: &'a Metrics,
}

impl<'a> Signals<'a> {
    pub fn new(features: &'a Features, metrics: &'a Metrics) -> Self {
        Self { features, metrics }
    }

    /// `N`, the message count.
    fn n(&self) -> f64 {
        self.features.message_count as f64
    }

    fn sentiment(&self) -> f64 {
        self.metrics.sentiment_score
    }

    fn emoji_adjusted_sentiment(&self) -> f64 {
        self.features.emoji_adjusted_sentiment() as f64
    }

    fn cue(&self, detector: Detector) -> bool {
        self.features.present(detector)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule<L: 'static> {
    pub label: L,
    pub when: fn(&Signals<'_>) -> bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RuleTable<L: 'static> {
    pub rules: &'static [Rule<L>],
    pub default: L,
}

impl<L: Copy> RuleTable<L> {
    /// First matching rule wins; otherwise the default.
    pub fn classify(&self, signals: &Signals<'_>) -> L {
        self.rules
            .iter()
            .find(|rule| (rule.when)(signals))
            .map_or(self.default, |rule| rule.label)
    }
}

const fn rule<L>(label: L, when: fn(&Signals<'_>) -> bool) -> Rule<L> {
    Rule { label, when }
}

// ── Core communication style ─────────────────────────────────────────────────

pub static FORMALITY: RuleTable<Formality> = RuleTable {
    rules: &[
        rule(Formality::SlangHeavy, |s| s.metrics.slang_rate > 0.2),
        rule(Formality::Casual, |s| {
            s.metrics.slang_rate > 0.1 || s.metrics.contraction_rate > 0.2
        }),
        rule(Formality::SemiFormal, |s| s.metrics.contraction_rate > 0.05),
    ],
    default: Formality::Formal,
};

pub static POLITENESS: RuleTable<Politeness> = RuleTable {
    rules: &[
        rule(Politeness::Polite, |s| s.metrics.polite_marker_rate > 0.1),
        rule(Politeness::Blunt, |s| s.metrics.imperative_rate > 0.3),
        rule(Politeness::Direct, |s| s.metrics.imperative_rate > 0.1),
    ],
    default: Politeness::Neutral,
};

/// Uses the emoji-adjusted sentiment score.
pub static EMOTION: RuleTable<Emotion> = RuleTable {
    rules: &[
        rule(Emotion::Sarcastic, |s| s.cue(Detector::SarcasmCue)),
        rule(Emotion::Enthusiastic, |s| s.emoji_adjusted_sentiment() > 0.5 * s.n()),
        rule(Emotion::Positive, |s| s.emoji_adjusted_sentiment() > 0.0),
        rule(Emotion::Frustrated, |s| s.emoji_adjusted_sentiment() < -0.5 * s.n()),
        rule(Emotion::Negative, |s| s.emoji_adjusted_sentiment() < 0.0),
    ],
    default: Emotion::Neutral,
};

pub static CONCISENESS: RuleTable<Conciseness> = RuleTable {
    rules: &[
        rule(Conciseness::Concise, |s| s.metrics.avg_tokens < 10.0),
        rule(Conciseness::Verbose, |s| s.metrics.avg_tokens > 20.0),
    ],
    default: Conciseness::Balanced,
};

pub static ENERGY: RuleTable<Energy> = RuleTable {
    rules: &[
        rule(Energy::HighEnergy, |s| {
            s.metrics.exclamation_rate > 1.0 || s.metrics.caps_rate > 0.1
        }),
        rule(Energy::Flat, |s| {
            s.metrics.exclamation_rate < 0.1 && s.metrics.caps_rate < 0.02
        }),
    ],
    default: Energy::Normal,
};

// ── Personality traits ───────────────────────────────────────────────────────

pub static HUMOR: RuleTable<Humor> = RuleTable {
    rules: &[
        rule(Humor::Sarcastic, |s| s.cue(Detector::SarcasmCue)),
        rule(Humor::Heavy, |s| s.metrics.humor_indicators > 0.3),
        rule(Humor::Moderate, |s| s.metrics.humor_indicators > 0.2),
        rule(Humor::Subtle, |s| s.metrics.humor_indicators > 0.1),
    ],
    default: Humor::None,
};

pub static TECHNICALITY: RuleTable<Technicality> = RuleTable {
    rules: &[
        rule(Technicality::Expert, |s| s.metrics.technical_term_rate > 0.1),
        rule(Technicality::Advanced, |s| s.metrics.technical_term_rate > 0.05),
        rule(Technicality::Intermediate, |s| s.metrics.technical_term_rate > 0.02),
        rule(Technicality::Basic, |s| s.metrics.technical_term_rate > 0.01),
    ],
    default: Technicality::NonTechnical,
};

pub static EMPATHY: RuleTable<Empathy> = RuleTable {
    rules: &[
        rule(Empathy::VeryHigh, |s| s.metrics.empathy_markers > 0.15),
        rule(Empathy::High, |s| s.metrics.empathy_markers > 0.1),
        rule(Empathy::Low, |s| s.metrics.empathy_markers < 0.05),
    ],
    default: Empathy::Moderate,
};

pub static CONFIDENCE: RuleTable<Confidence> = RuleTable {
    rules: &[
        rule(Confidence::Assertive, |s| {
            s.metrics.confidence_markers > 2.0 * s.metrics.uncertainty_markers
        }),
        rule(Confidence::Confident, |s| {
            s.metrics.confidence_markers > s.metrics.uncertainty_markers
        }),
        rule(Confidence::Tentative, |s| {
            s.metrics.uncertainty_markers > 2.0 * s.metrics.confidence_markers
        }),
    ],
    default: Confidence::Moderate,
};

// ── Communication patterns ───────────────────────────────────────────────────

pub static QUESTION_STYLE: RuleTable<QuestionStyle> = RuleTable {
    rules: &[
        rule(QuestionStyle::Clarifying, |s| s.metrics.question_rate > 0.3),
        rule(QuestionStyle::Rhetorical, |s| s.cue(Detector::RhetoricalCue)),
        rule(QuestionStyle::Indirect, |s| s.cue(Detector::IndirectQuestionCue)),
    ],
    default: QuestionStyle::Direct,
};

pub static GREETING_STYLE: RuleTable<GreetingStyle> = RuleTable {
    rules: &[
        rule(GreetingStyle::Formal, |s| s.cue(Detector::FormalGreeting)),
        rule(GreetingStyle::Warm, |s| s.cue(Detector::WarmGreeting)),
        rule(GreetingStyle::Casual, |s| s.cue(Detector::Greeting)),
    ],
    default: GreetingStyle::Minimal,
};

pub static CLOSING_STYLE: RuleTable<ClosingStyle> = RuleTable {
    rules: &[
        rule(ClosingStyle::Formal, |s| s.cue(Detector::FormalClosing)),
        rule(ClosingStyle::Warm, |s| s.cue(Detector::WarmClosing)),
        rule(ClosingStyle::Casual, |s| s.cue(Detector::Closing)),
    ],
    default: ClosingStyle::Abrupt,
};

/// Driven by per-message character lengths.
pub static RESPONSE_PATTERN: RuleTable<ResponsePattern> = RuleTable {
    rules: &[
        rule(ResponsePattern::Spontaneous, |s| s.features.message_lengths.variation() > 0.8),
        rule(ResponsePattern::Deliberate, |s| s.features.message_lengths.variation() < 0.3),
        rule(ResponsePattern::Immediate, |s| s.features.message_lengths.mean < 20.0),
    ],
    default: ResponsePattern::Thoughtful,
};

// ── Linguistic characteristics ───────────────────────────────────────────────

pub static VOCABULARY_LEVEL: RuleTable<VocabularyLevel> = RuleTable {
    rules: &[
        rule(VocabularyLevel::Sophisticated, |s| s.metrics.vocabulary_diversity > 0.7),
        rule(VocabularyLevel::Advanced, |s| s.metrics.vocabulary_diversity > 0.6),
        rule(VocabularyLevel::Basic, |s| s.metrics.vocabulary_diversity < 0.4),
    ],
    default: VocabularyLevel::Intermediate,
};

/// Complex-punctuation rate is per sentence.
pub static SENTENCE_COMPLEXITY: RuleTable<SentenceComplexity> = RuleTable {
    rules: &[
        rule(SentenceComplexity::Complex, |s| s.metrics.complex_sentence_rate > 0.3),
        rule(SentenceComplexity::Simple, |s| s.metrics.complex_sentence_rate < 0.1),
        rule(SentenceComplexity::Varied, |s| {
            s.metrics.std_dev_tokens > 0.5 * s.metrics.avg_tokens
        }),
    ],
    default: SentenceComplexity::Compound,
};

pub static DISCOURSE_MARKERS: RuleTable<DiscourseMarkers> = RuleTable {
    rules: &[
        rule(DiscourseMarkers::Excessive, |s| s.metrics.interjection_rate > 0.2),
        rule(DiscourseMarkers::Frequent, |s| s.metrics.interjection_rate > 0.1),
        rule(DiscourseMarkers::Minimal, |s| s.metrics.interjection_rate < 0.05),
    ],
    default: DiscourseMarkers::Moderate,
};

// ── Behavioral patterns ──────────────────────────────────────────────────────

/// Uses the lexicon sentiment score without the emoji adjustment.
pub static CONFLICT_STYLE: RuleTable<ConflictStyle> = RuleTable {
    rules: &[
        rule(ConflictStyle::Competitive, |s| {
            s.sentiment() < -0.3 * s.n() && s.metrics.imperative_rate > 0.2
        }),
        rule(ConflictStyle::Avoidant, |s| s.sentiment() < -0.1 * s.n()),
        rule(ConflictStyle::Accommodating, |s| s.metrics.polite_marker_rate > 0.15),
    ],
    default: ConflictStyle::Collaborative,
};

/// Uses the lexicon sentiment score without the emoji adjustment.
pub static FEEDBACK_STYLE: RuleTable<FeedbackStyle> = RuleTable {
    rules: &[
        rule(FeedbackStyle::Direct, |s| s.metrics.imperative_rate > 0.3),
        rule(FeedbackStyle::Gentle, |s| s.metrics.polite_marker_rate > 0.2),
        rule(FeedbackStyle::Harsh, |s| s.sentiment() < -0.2 * s.n()),
    ],
    default: FeedbackStyle::Constructive,
};

/// Interruption style cannot be observed in text: a corpus has no timing or
/// turn-taking data, so this is always `moderate`.
pub fn interruption_style(_signals: &Signals<'_>) -> InterruptionStyle {
    InterruptionStyle::Moderate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::MessageCorpus;

    fn with_metrics(message_count: usize, edit: impl FnOnce(&mut Metrics)) -> (Features, Metrics) {
        let features = Features::synthetic(message_count, &[]);
        let mut metrics = Metrics::default();
        edit(&mut metrics);
        (features, metrics)
    }

    fn from_messages(messages: &[&str]) -> (Features, Metrics) {
        let corpus = MessageCorpus::new(messages.iter().copied()).unwrap();
        let features = Features::extract(&corpus);
        let metrics = Metrics::from_features(&features);
        (features, metrics)
    }

    #[test]
    fn formality_first_match_wins() {
        // Both slang-heavy and casual thresholds hold: slang-heavy is listed first.
        let (f, m) = with_metrics(10, |m| {
            m.slang_rate = 0.25;
            m.contraction_rate = 0.5;
        });
        assert_eq!(FORMALITY.classify(&Signals::new(&f, &m)), Formality::SlangHeavy);

        let (f, m) = with_metrics(10, |m| {
            m.slang_rate = 0.0;
            m.contraction_rate = 0.21;
        });
        assert_eq!(FORMALITY.classify(&Signals::new(&f, &m)), Formality::Casual);

        let (f, m) = with_metrics(10, |m| {
            m.slang_rate = 0.0;
            m.contraction_rate = 0.06;
        });
        assert_eq!(FORMALITY.classify(&Signals::new(&f, &m)), Formality::SemiFormal);

        let (f, m) = with_metrics(10, |m| {
            m.slang_rate = 0.0;
            m.contraction_rate = 0.05;
        });
        assert_eq!(FORMALITY.classify(&Signals::new(&f, &m)), Formality::Formal);
    }

    #[test]
    fn politeness_prefers_polite_over_blunt() {
        let (f, m) = with_metrics(4, |m| {
            m.polite_marker_rate = 0.2;
            m.imperative_rate = 0.9;
        });
        assert_eq!(POLITENESS.classify(&Signals::new(&f, &m)), Politeness::Polite);

        let (f, m) = with_metrics(4, |m| {
            m.polite_marker_rate = 0.0;
            m.imperative_rate = 0.2;
        });
        assert_eq!(POLITENESS.classify(&Signals::new(&f, &m)), Politeness::Direct);
    }

    #[test]
    fn emotion_uses_emoji_adjusted_sentiment_scaled_by_n() {
        let (f, m) = from_messages(&["good", "fine", "ok", "sure"]);
        // score 1 with N = 4: positive but not above 0.5 * N
        assert_eq!(EMOTION.classify(&Signals::new(&f, &m)), Emotion::Positive);

        let (f, m) = from_messages(&["good 😊", "great", "fine", "ok"]);
        assert_eq!(EMOTION.classify(&Signals::new(&f, &m)), Emotion::Enthusiastic);

        let (f, m) = from_messages(&["awful 😢 😢", "meh"]);
        assert_eq!(EMOTION.classify(&Signals::new(&f, &m)), Emotion::Frustrated);

        let (f, m) = from_messages(&["great?? sure"]);
        assert_eq!(EMOTION.classify(&Signals::new(&f, &m)), Emotion::Sarcastic);

        let (f, m) = from_messages(&["the meeting is at noon"]);
        assert_eq!(EMOTION.classify(&Signals::new(&f, &m)), Emotion::Neutral);
    }

    #[test]
    fn energy_thresholds() {
        let (f, m) = with_metrics(2, |m| {
            m.exclamation_rate = 1.5;
            m.caps_rate = 0.0;
        });
        assert_eq!(ENERGY.classify(&Signals::new(&f, &m)), Energy::HighEnergy);

        let (f, m) = with_metrics(2, |m| {
            m.exclamation_rate = 0.0;
            m.caps_rate = 0.0;
        });
        assert_eq!(ENERGY.classify(&Signals::new(&f, &m)), Energy::Flat);

        let (f, m) = with_metrics(2, |m| {
            m.exclamation_rate = 0.5;
            m.caps_rate = 0.0;
        });
        assert_eq!(ENERGY.classify(&Signals::new(&f, &m)), Energy::Normal);
    }

    #[test]
    fn humor_and_technicality_ladders() {
        for (rate, expected) in [
            (0.35, Humor::Heavy),
            (0.25, Humor::Moderate),
            (0.15, Humor::Subtle),
            (0.1, Humor::None),
        ] {
            let (f, m) = with_metrics(10, |m| m.humor_indicators = rate);
            assert_eq!(HUMOR.classify(&Signals::new(&f, &m)), expected, "rate {rate}");
        }
        for (rate, expected) in [
            (0.2, Technicality::Expert),
            (0.06, Technicality::Advanced),
            (0.03, Technicality::Intermediate),
            (0.015, Technicality::Basic),
            (0.0, Technicality::NonTechnical),
        ] {
            let (f, m) = with_metrics(10, |m| m.technical_term_rate = rate);
            assert_eq!(TECHNICALITY.classify(&Signals::new(&f, &m)), expected, "rate {rate}");
        }
    }

    #[test]
    fn empathy_and_discourse_have_middle_defaults() {
        let (f, m) = with_metrics(10, |m| m.empathy_markers = 0.07);
        assert_eq!(EMPATHY.classify(&Signals::new(&f, &m)), Empathy::Moderate);
        let (f, m) = with_metrics(10, |m| m.empathy_markers = 0.0);
        assert_eq!(EMPATHY.classify(&Signals::new(&f, &m)), Empathy::Low);

        let (f, m) = with_metrics(10, |m| m.interjection_rate = 0.07);
        assert_eq!(DISCOURSE_MARKERS.classify(&Signals::new(&f, &m)), DiscourseMarkers::Moderate);
        let (f, m) = with_metrics(10, |m| m.interjection_rate = 0.25);
        assert_eq!(DISCOURSE_MARKERS.classify(&Signals::new(&f, &m)), DiscourseMarkers::Excessive);
    }

    #[test]
    fn confidence_compares_marker_rates() {
        let (f, m) = with_metrics(10, |m| {
            m.confidence_markers = 0.0;
            m.uncertainty_markers = 0.0;
        });
        assert_eq!(CONFIDENCE.classify(&Signals::new(&f, &m)), Confidence::Moderate);

        let (f, m) = with_metrics(10, |m| {
            m.confidence_markers = 0.3;
            m.uncertainty_markers = 0.2;
        });
        assert_eq!(CONFIDENCE.classify(&Signals::new(&f, &m)), Confidence::Confident);

        let (f, m) = with_metrics(10, |m| {
            m.confidence_markers = 0.1;
            m.uncertainty_markers = 0.3;
        });
        assert_eq!(CONFIDENCE.classify(&Signals::new(&f, &m)), Confidence::Tentative);

        let (f, m) = with_metrics(10, |m| {
            m.confidence_markers = 0.1;
            m.uncertainty_markers = 0.0;
        });
        assert_eq!(CONFIDENCE.classify(&Signals::new(&f, &m)), Confidence::Assertive);
    }

    #[test]
    fn question_greeting_and_closing_cues() {
        let (f, m) = from_messages(&["Could you send it", "Good morning team", "Best regards"]);
        let signals = Signals::new(&f, &m);
        assert_eq!(QUESTION_STYLE.classify(&signals), QuestionStyle::Indirect);
        assert_eq!(GREETING_STYLE.classify(&signals), GreetingStyle::Formal);
        assert_eq!(CLOSING_STYLE.classify(&signals), ClosingStyle::Formal);

        let (f, m) = from_messages(&["hey what's new?", "ok?"]);
        let signals = Signals::new(&f, &m);
        assert_eq!(QUESTION_STYLE.classify(&signals), QuestionStyle::Clarifying);
        assert_eq!(GREETING_STYLE.classify(&signals), GreetingStyle::Casual);
        assert_eq!(CLOSING_STYLE.classify(&signals), ClosingStyle::Abrupt);
    }

    #[test]
    fn response_pattern_from_length_spread() {
        let (f, m) = from_messages(&["abcd", "abcd", "abcd"]);
        assert_eq!(RESPONSE_PATTERN.classify(&Signals::new(&f, &m)), ResponsePattern::Deliberate);

        let (f, m) = from_messages(&["a", "a", "a", "this one is much much longer than the rest"]);
        assert_eq!(RESPONSE_PATTERN.classify(&Signals::new(&f, &m)), ResponsePattern::Spontaneous);
    }

    #[test]
    fn sentence_complexity_varied_branch() {
        let (f, m) = with_metrics(5, |m| {
            m.complex_sentence_rate = 0.2;
            m.avg_tokens = 10.0;
            m.std_dev_tokens = 6.0;
        });
        assert_eq!(SENTENCE_COMPLEXITY.classify(&Signals::new(&f, &m)), SentenceComplexity::Varied);

        let (f, m) = with_metrics(5, |m| {
            m.complex_sentence_rate = 0.2;
            m.avg_tokens = 10.0;
            m.std_dev_tokens = 2.0;
        });
        assert_eq!(SENTENCE_COMPLEXITY.classify(&Signals::new(&f, &m)), SentenceComplexity::Compound);
    }

    #[test]
    fn conflict_and_feedback_use_raw_sentiment() {
        let (f, m) = with_metrics(10, |m| {
            m.sentiment_score = -4.0;
            m.imperative_rate = 0.25;
            m.polite_marker_rate = 0.0;
        });
        let signals = Signals::new(&f, &m);
        assert_eq!(CONFLICT_STYLE.classify(&signals), ConflictStyle::Competitive);
        assert_eq!(FEEDBACK_STYLE.classify(&signals), FeedbackStyle::Harsh);

        let (f, m) = with_metrics(10, |m| {
            m.sentiment_score = 0.0;
            m.imperative_rate = 0.0;
            m.polite_marker_rate = 0.25;
        });
        let signals = Signals::new(&f, &m);
        assert_eq!(CONFLICT_STYLE.classify(&signals), ConflictStyle::Accommodating);
        assert_eq!(FEEDBACK_STYLE.classify(&signals), FeedbackStyle::Gentle);
    }

    #[test]
    fn interruption_style_is_constant() {
        let (f, m) = from_messages(&["wait, let me finish!!"]);
        assert_eq!(interruption_style(&Signals::new(&f, &m)), InterruptionStyle::Moderate);
    }
}
