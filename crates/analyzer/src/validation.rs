//! Structural validation of profile-shaped JSON.
//!
//! The validator never coerces or repairs: it only reports.  Typed
//! [`ToneProfile`](crate::ToneProfile)s go through the same path after
//! serialisation, so a non-finite metric (serialised as `null`) is caught too.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::labels::{
    ClosingStyle, Conciseness, Confidence, ConflictStyle, DiscourseMarkers, Emotion, Empathy,
    Energy, FeedbackStyle, Formality, GreetingStyle, Humor, InterruptionStyle, Politeness,
    QuestionStyle, ResponsePattern, SentenceComplexity, Technicality, VocabularyLevel,
};
use crate::metrics::METRIC_RANGES;

/// Every categorical field and its closed label set.
pub const CATEGORICAL_FIELDS: &[(&str, &[&str])] = &[
    ("formality", Formality::LABELS),
    ("politeness", Politeness::LABELS),
    ("emotion", Emotion::LABELS),
    ("conciseness", Conciseness::LABELS),
    ("energy", Energy::LABELS),
    ("humor", Humor::LABELS),
    ("technicality", Technicality::LABELS),
    ("empathy", Empathy::LABELS),
    ("confidence", Confidence::LABELS),
    ("questionStyle", QuestionStyle::LABELS),
    ("greetingStyle", GreetingStyle::LABELS),
    ("closingStyle", ClosingStyle::LABELS),
    ("interruptionStyle", InterruptionStyle::LABELS),
    ("responsePattern", ResponsePattern::LABELS),
    ("vocabularyLevel", VocabularyLevel::LABELS),
    ("sentenceComplexity", SentenceComplexity::LABELS),
    ("discourseMarkers", DiscourseMarkers::LABELS),
    ("conflictStyle", ConflictStyle::LABELS),
    ("feedbackStyle", FeedbackStyle::LABELS),
];

pub const LIST_FIELDS: &[&str] = &[
    "signaturePhrases",
    "commonWords",
    "avoidedWords",
    "communicationQuirks",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name; metrics use dotted paths such as `metrics.slangRate`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub(crate) fn rejected(field: &str, message: impl Into<String>) -> Self {
        Self::from_errors(vec![FieldError::new(field, message)])
    }

    /// Names of the offending fields, in report order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|error| error.field.as_str())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return f.write_str("valid");
        }
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Check a candidate profile without modifying it.
pub fn validate_profile(candidate: &Value) -> ValidationReport {
    let Some(object) = candidate.as_object() else {
        return ValidationReport::rejected("profile", "must be a JSON object");
    };

    let mut errors = Vec::new();
    check_categorical(object, &mut errors);
    check_lists(object, &mut errors);
    check_metrics(object, &mut errors);
    ValidationReport::from_errors(errors)
}

fn check_categorical(object: &Map<String, Value>, errors: &mut Vec<FieldError>) {
    for (field, labels) in CATEGORICAL_FIELDS {
        match object.get(*field) {
            None => errors.push(FieldError::new(*field, "is required")),
            Some(Value::String(label)) if labels.contains(&label.as_str()) => {}
            Some(Value::String(label)) => errors.push(FieldError::new(
                *field,
                format!("\"{label}\" is not one of: {}", labels.join(", ")),
            )),
            Some(_) => errors.push(FieldError::new(*field, "must be a string")),
        }
    }
}

fn check_lists(object: &Map<String, Value>, errors: &mut Vec<FieldError>) {
    for field in LIST_FIELDS {
        match object.get(*field) {
            None => errors.push(FieldError::new(*field, "is required")),
            Some(Value::Array(items)) if items.iter().all(Value::is_string) => {}
            Some(Value::Array(_)) => {
                errors.push(FieldError::new(*field, "must contain only strings"))
            }
            Some(_) => errors.push(FieldError::new(*field, "must be an array of strings")),
        }
    }
}

fn check_metrics(object: &Map<String, Value>, errors: &mut Vec<FieldError>) {
    let metrics = match object.get("metrics") {
        Some(Value::Object(metrics)) => metrics,
        Some(_) => {
            errors.push(FieldError::new("metrics", "must be an object"));
            return;
        }
        None => {
            errors.push(FieldError::new("metrics", "is required"));
            return;
        }
    };

    for (name, range) in METRIC_RANGES {
        let path = format!("metrics.{name}");
        match metrics.get(*name) {
            None => errors.push(FieldError::new(path, "is required")),
            Some(Value::Number(number)) => match number.as_f64() {
                Some(value) if range.contains(value) => {}
                _ => errors.push(FieldError::new(path, format!("must be {}", range.describe()))),
            },
            Some(_) => errors.push(FieldError::new(path, "must be a finite number")),
        }
    }
}
