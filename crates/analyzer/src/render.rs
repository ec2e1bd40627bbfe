//! Markdown report rendering.
//!
//! The report is the natural-language form of a profile handed to a rewriting
//! model.  Rendering is guarded by validation: an invalid profile produces an
//! error and no text.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::labels::{DiscourseMarkers, Energy, Humor, VocabularyLevel};
use crate::profile::ToneProfile;
use crate::validation::{ValidationReport, validate_profile};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot render invalid tone profile: {0}")]
    Invalid(ValidationReport),
    #[error("tone profile passed validation but could not be decoded: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl RenderError {
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Invalid(report) => Some(report),
            Self::Malformed(_) => None,
        }
    }
}

pub fn render_profile(profile: &ToneProfile) -> Result<String, RenderError> {
    ensure_valid(profile.validate())?;
    Ok(render_report(profile))
}

/// Render externally supplied JSON.  Validation runs on the raw value first, so
/// out-of-set labels are reported by field rather than as decode errors.
pub fn render_value(candidate: &Value) -> Result<String, RenderError> {
    ensure_valid(validate_profile(candidate))?;
    let profile: ToneProfile = serde_json::from_value(candidate.clone())?;
    Ok(render_report(&profile))
}

fn ensure_valid(report: ValidationReport) -> Result<(), RenderError> {
    if report.valid {
        return Ok(());
    }
    warn!(errors = report.errors.len(), %report, "refusing to render invalid tone profile");
    Err(RenderError::Invalid(report))
}

#[derive(Default)]
struct Report {
    lines: Vec<String>,
}

impl Report {
    fn section(&mut self, title: &str, items: Vec<String>) {
        self.lines.push(format!("## {title}"));
        self.lines.extend(items);
        self.lines.push(String::new());
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

fn field(key: &str, label: &str, description: &str) -> String {
    format!("**{key}**: {label} - {description}")
}

macro_rules! labelled {
    ($key:literal, $value:expr) => {
        field($key, $value.label(), $value.description())
    };
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None detected".to_string()
    } else {
        items.join(", ")
    }
}

fn render_report(p: &ToneProfile) -> String {
    let mut report = Report::default();

    report.section(
        "Communication Style Analysis",
        vec![
            labelled!("Formality", p.formality),
            labelled!("Politeness", p.politeness),
            labelled!("Emotional Tone", p.emotion),
            labelled!("Conciseness", p.conciseness),
            labelled!("Energy Level", p.energy),
        ],
    );
    report.section(
        "Personality Traits",
        vec![
            labelled!("Humor Style", p.humor),
            labelled!("Technical Level", p.technicality),
            labelled!("Empathy Level", p.empathy),
            labelled!("Confidence Level", p.confidence),
        ],
    );
    report.section(
        "Communication Patterns",
        vec![
            labelled!("Question Style", p.question_style),
            labelled!("Greeting Style", p.greeting_style),
            labelled!("Closing Style", p.closing_style),
            labelled!("Interruption Style", p.interruption_style),
            labelled!("Response Pattern", p.response_pattern),
        ],
    );
    report.section(
        "Linguistic Characteristics",
        vec![
            labelled!("Vocabulary Level", p.vocabulary_level),
            labelled!("Sentence Complexity", p.sentence_complexity),
            labelled!("Discourse Markers", p.discourse_markers),
        ],
    );

    let top_words: Vec<String> = p.common_words.iter().take(5).cloned().collect();
    report.section(
        "Personalization Elements",
        vec![
            format!("**Signature Phrases**: {}", list_or_none(&p.signature_phrases)),
            format!("**Common Words**: {}", list_or_none(&top_words)),
            format!("**Communication Quirks**: {}", list_or_none(&p.communication_quirks)),
        ],
    );
    report.section(
        "Behavioral Patterns",
        vec![
            labelled!("Conflict Style", p.conflict_style),
            labelled!("Feedback Style", p.feedback_style),
        ],
    );

    let m = &p.metrics;
    report.section(
        "Key Metrics",
        vec![
            format!("- Contraction Rate: {}", percent(m.contraction_rate)),
            format!("- Slang Usage: {}", percent(m.slang_rate)),
            format!("- Emoji Usage: {}", percent(m.emoji_rate)),
            format!("- Question Rate: {}", percent(m.question_rate)),
            format!("- Vocabulary Diversity: {}", percent(m.vocabulary_diversity)),
            format!("- Average Sentence Length: {:.1} words", m.avg_sentence_length),
        ],
    );

    let mut items = vec!["When adapting messages to match this person's style:".to_string()];
    items.extend(
        guidelines(p)
            .into_iter()
            .enumerate()
            .map(|(i, guideline)| format!("{}. {guideline}", i + 1)),
    );
    report.section("Adaptation Guidelines", items);

    report.finish()
}

/// Adaptation guidelines in order, before numbering.
fn guidelines(p: &ToneProfile) -> Vec<String> {
    let energy = match p.energy {
        Energy::HighEnergy => "high energy",
        other => other.label(),
    };
    let humor = match p.humor {
        Humor::None => "Avoid humor".to_string(),
        other => format!("Use {other} humor when appropriate"),
    };
    let vocabulary = match p.vocabulary_level {
        VocabularyLevel::Sophisticated => {
            "Use sophisticated vocabulary in short, punchy sentences".to_string()
        }
        other => format!("Use {other}"),
    };

    let mut out = vec![
        format!("Use {} language with {} politeness", p.formality, p.politeness),
        format!("Maintain {} emotional tone and {energy}", p.emotion),
        format!("Keep responses {} in length", p.conciseness),
        humor,
        vocabulary,
        format!("Structure sentences with {} complexity", p.sentence_complexity),
    ];
    if p.discourse_markers == DiscourseMarkers::Excessive {
        out.push("Allow frequent use of fillers and transition markers".to_string());
    }
    out.push(match p.signature_phrases.first() {
        Some(phrase) => format!("Incorporate signature phrases like \"{phrase}\""),
        None => "Avoid signature phrases".to_string(),
    });
    out.push(if p.communication_quirks.is_empty() {
        "Maintain clean communication style".to_string()
    } else {
        format!("Include quirks: {}", p.communication_quirks.join(", "))
    });
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::labels::Politeness;

    fn guideline_lines(report: &str) -> Vec<&str> {
        report
            .split("## Adaptation Guidelines\n")
            .nth(1)
            .unwrap()
            .lines()
            .skip(1)
            .filter(|line| !line.is_empty())
            .collect()
    }

    #[test]
    fn sections_appear_in_order() {
        let report = render_profile(&ToneProfile::default()).unwrap();
        let titles: Vec<&str> = report
            .lines()
            .filter_map(|line| line.strip_prefix("## "))
            .collect();
        assert_eq!(
            titles,
            vec![
                "Communication Style Analysis",
                "Personality Traits",
                "Communication Patterns",
                "Linguistic Characteristics",
                "Personalization Elements",
                "Behavioral Patterns",
                "Key Metrics",
                "Adaptation Guidelines",
            ]
        );
        assert!(report.ends_with("\n"));
    }

    #[test]
    fn field_lines_carry_label_and_description() {
        let report = render_profile(&ToneProfile::default()).unwrap();
        assert!(report.contains(
            "**Formality**: semi-formal - Some contractions, mixed formal/casual vocabulary"
        ));
        assert!(report.contains("**Signature Phrases**: None detected"));
        assert!(report.contains("**Communication Quirks**: None detected"));
    }

    #[test]
    fn metrics_are_formatted() {
        let mut profile = ToneProfile::default();
        profile.metrics.contraction_rate = 0.125;
        profile.metrics.vocabulary_diversity = 0.7;
        profile.metrics.avg_sentence_length = 12.0;
        let report = render_profile(&profile).unwrap();
        assert!(report.contains("- Contraction Rate: 12.5%"));
        assert!(report.contains("- Vocabulary Diversity: 70.0%"));
        assert!(report.contains("- Average Sentence Length: 12.0 words"));
    }

    #[test]
    fn common_words_are_cut_to_five() {
        let mut profile = ToneProfile::default();
        profile.common_words = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let report = render_profile(&profile).unwrap();
        assert!(report.contains("**Common Words**: alpha, beta, gamma, delta, epsilon\n"));
    }

    #[test]
    fn eight_guidelines_by_default() {
        let report = render_profile(&ToneProfile::default()).unwrap();
        let lines = guideline_lines(&report);
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "1. Use semi-formal language with direct politeness");
        assert_eq!(lines[3], "4. Avoid humor");
        assert_eq!(lines[4], "5. Use intermediate");
        assert_eq!(lines[6], "7. Avoid signature phrases");
        assert_eq!(lines[7], "8. Maintain clean communication style");
    }

    #[test]
    fn excessive_discourse_markers_add_a_ninth_guideline() {
        let mut profile = ToneProfile::default();
        profile.discourse_markers = DiscourseMarkers::Excessive;
        profile.energy = Energy::HighEnergy;
        profile.signature_phrases = vec!["you know".to_string()];
        profile.communication_quirks = vec!["excessive exclamation".to_string()];

        let report = render_profile(&profile).unwrap();
        let lines = guideline_lines(&report);
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[1], "2. Maintain neutral emotional tone and high energy");
        assert_eq!(lines[6], "7. Allow frequent use of fillers and transition markers");
        assert_eq!(lines[7], "8. Incorporate signature phrases like \"you know\"");
        assert_eq!(lines[8], "9. Include quirks: excessive exclamation");
    }

    #[test]
    fn sophisticated_vocabulary_has_special_wording() {
        let mut profile = ToneProfile::default();
        profile.vocabulary_level = VocabularyLevel::Sophisticated;
        profile.humor = Humor::Playful;
        let report = render_profile(&profile).unwrap();
        let lines = guideline_lines(&report);
        assert_eq!(lines[3], "4. Use playful humor when appropriate");
        assert_eq!(lines[4], "5. Use sophisticated vocabulary in short, punchy sentences");
    }

    #[test]
    fn unknown_label_fails_without_text() {
        let mut value = serde_json::to_value(ToneProfile::default()).unwrap();
        value["politeness"] = json!("unknown");

        let err = render_value(&value).unwrap_err();
        let report = err.report().expect("validation failure carries a report");
        assert!(!report.valid);
        assert!(report.fields().any(|field| field == "politeness"));
        assert!(err.to_string().contains("politeness"));
    }

    #[test]
    fn valid_value_renders_like_the_typed_profile() {
        let mut profile = ToneProfile::default();
        profile.politeness = Politeness::Polite;
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(render_value(&value).unwrap(), render_profile(&profile).unwrap());
    }

    #[test]
    fn non_finite_metric_blocks_rendering() {
        let mut profile = ToneProfile::default();
        profile.metrics.emoji_rate = f64::INFINITY;
        let err = render_profile(&profile).unwrap_err();
        assert!(matches!(err, RenderError::Invalid(_)));
    }
}
