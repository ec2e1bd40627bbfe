//! Personalization mining: recurring phrases, favourite words, avoided
//! function words and typographic quirks.

use std::collections::HashMap;

use tone_config::AnalyzerConfig;

use crate::corpus::MessageCorpus;
use crate::features::{Features, sentence_units};
use crate::patterns::{Detector, word_tokens};

/// Quirk labels in reporting order, each keyed by the detector that reveals it.
const QUIRKS: &[(Detector, &str)] = &[
    (Detector::ExclamationRun, "excessive exclamation"),
    (Detector::QuestionRun, "excessive questioning"),
    (Detector::EllipsisRun, "excessive ellipsis"),
    (Detector::ShoutedWord, "frequent caps"),
    (Detector::CharacterRun, "letter repetition"),
];

const HEAVY_EMOJI_QUIRK: &str = "heavy emoji usage";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Personalization {
    pub signature_phrases: Vec<String>,
    pub common_words: Vec<String>,
    pub avoided_words: Vec<String>,
    pub communication_quirks: Vec<String>,
}

impl Personalization {
    pub fn mine(corpus: &MessageCorpus, features: &Features, config: &AnalyzerConfig) -> Self {
        let text = corpus.text();
        Self {
            signature_phrases: signature_phrases(
                text,
                config.min_phrase_chars,
                config.signature_phrase_limit,
            ),
            common_words: common_words(text, config.common_word_limit),
            avoided_words: avoided_words(
                text,
                features.word_count,
                &config.reference_words,
                config.avoided_word_rate,
            ),
            communication_quirks: communication_quirks(features, config.heavy_emoji_threshold),
        }
    }
}

/// Frequency counter that remembers first-seen order for tie-breaking.
#[derive(Default)]
struct Tally {
    order: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, key: String) {
        match self.index.get(&key) {
            Some(&slot) => self.order[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.order.len());
                self.order.push((key, 1));
            }
        }
    }

    /// Keys with at least `min_count` hits, most frequent first; equal counts
    /// keep first-occurrence order.
    fn top(mut self, min_count: usize, limit: usize) -> Vec<String> {
        self.order.retain(|(_, count)| *count >= min_count);
        self.order.sort_by(|a, b| b.1.cmp(&a.1));
        self.order.into_iter().take(limit).map(|(key, _)| key).collect()
    }
}

/// Lower-cased two-word windows that appear at least twice across
/// sentence-like units of `min_chars` or more.
pub fn signature_phrases(text: &str, min_chars: usize, limit: usize) -> Vec<String> {
    let mut tally = Tally::default();
    for unit in sentence_units(text) {
        let unit = unit.trim();
        if unit.chars().count() < min_chars {
            continue;
        }
        let words: Vec<String> = unit.split_whitespace().map(str::to_lowercase).collect();
        for pair in words.windows(2) {
            tally.add(format!("{} {}", pair[0], pair[1]));
        }
    }
    tally.top(2, limit)
}

pub fn common_words(text: &str, limit: usize) -> Vec<String> {
    let mut tally = Tally::default();
    for word in word_tokens(text).filter(|word| word.chars().count() > 2) {
        tally.add(word);
    }
    tally.top(1, limit)
}

/// Reference words that never appear, or appear in less than `rate` of all
/// words.  Reported in reference-list order.
pub fn avoided_words(text: &str, word_count: usize, reference: &[String], rate: f64) -> Vec<String> {
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    for token in word_tokens(text) {
        *occurrences.entry(token).or_default() += 1;
    }

    let floor = word_count as f64 * rate;
    reference
        .iter()
        .filter(|word| {
            let count = occurrences.get(&word.to_lowercase()).copied().unwrap_or(0);
            count == 0 || (count as f64) < floor
        })
        .cloned()
        .collect()
}

pub fn communication_quirks(features: &Features, heavy_emoji_threshold: usize) -> Vec<String> {
    let mut quirks: Vec<String> = QUIRKS
        .iter()
        .filter(|(detector, _)| features.present(*detector))
        .map(|(_, label)| label.to_string())
        .collect();
    if features.count(Detector::Emoji) > heavy_emoji_threshold {
        quirks.push(HEAVY_EMOJI_QUIRK.to_string());
    }
    quirks
}
