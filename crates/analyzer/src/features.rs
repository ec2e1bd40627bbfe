//! Feature extraction: one pass of every detector over a corpus plus the
//! sentence, message-length and vocabulary statistics the metrics need.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::corpus::MessageCorpus;
use crate::patterns::{COMPILED, Detector, Matcher, word_tokens};

static SENTENCE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("static sentence pattern must compile"));

/// Mean and population standard deviation of a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spread {
    pub mean: f64,
    pub std_dev: f64,
}

impl Spread {
    /// An empty sample has zero mean and zero spread.
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Coefficient of variation; zero when the mean is zero.
    pub fn variation(&self) -> f64 {
        if self.mean > 0.0 {
            self.std_dev / self.mean
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub message_count: usize,
    /// Whitespace-delimited tokens across the corpus.
    pub word_count: usize,
    /// Sentences terminated by `.`, `!` or `?`.
    pub sentence_count: usize,
    /// Whitespace tokens per terminated sentence.
    pub sentence_tokens: Spread,
    /// Characters per message.
    pub message_lengths: Spread,
    /// Case-folded words longer than two characters.
    pub vocabulary_total: usize,
    pub vocabulary_unique: usize,
    counts: BTreeMap<Detector, usize>,
}

impl Features {
    pub fn extract(corpus: &MessageCorpus) -> Self {
        let text = corpus.text();

        let mut counts = BTreeMap::new();
        for pattern in COMPILED.iter() {
            let count = match &pattern.matcher {
                Matcher::Regex(re) => re.find_iter(text).count(),
                Matcher::Lexicon(words) => corpus
                    .messages()
                    .iter()
                    .map(|message| lexicon_hits(message, words))
                    .sum(),
                Matcher::Scan(scan) => scan(text),
            };
            counts.insert(pattern.detector, count);
        }

        let token_counts: Vec<f64> = terminated_sentences(text)
            .iter()
            .map(|sentence| sentence.split_whitespace().count() as f64)
            .collect();

        let lengths: Vec<f64> = corpus
            .messages()
            .iter()
            .map(|message| message.chars().count() as f64)
            .collect();

        let vocabulary: Vec<String> = word_tokens(text)
            .filter(|word| word.chars().count() > 2)
            .collect();
        let vocabulary_unique = vocabulary.iter().collect::<HashSet<_>>().len();

        Self {
            message_count: corpus.len(),
            word_count: text.split_whitespace().count(),
            sentence_count: token_counts.len(),
            sentence_tokens: Spread::of(&token_counts),
            message_lengths: Spread::of(&lengths),
            vocabulary_total: vocabulary.len(),
            vocabulary_unique,
            counts,
        }
    }

    pub fn count(&self, detector: Detector) -> usize {
        self.counts.get(&detector).copied().unwrap_or(0)
    }

    /// Presence test: the detector matched anywhere in the corpus.
    pub fn present(&self, detector: Detector) -> bool {
        self.count(detector) > 0
    }

    /// Positive minus negative lexicon hits, summed message by message.
    /// Emoji are not included.
    pub fn sentiment_score(&self) -> i64 {
        self.count(Detector::PositiveWord) as i64 - self.count(Detector::NegativeWord) as i64
    }

    /// Lexicon score adjusted by positive and negative emoji.
    pub fn emoji_adjusted_sentiment(&self) -> i64 {
        self.sentiment_score() + self.count(Detector::PositiveEmoji) as i64
            - self.count(Detector::NegativeEmoji) as i64
    }
}

#[cfg(test)]
impl Features {
    /// Hand-built features for classifier tests that drive metrics directly.
    pub(crate) fn synthetic(message_count: usize, counts: &[(Detector, usize)]) -> Self {
        Self {
            message_count,
            word_count: 0,
            sentence_count: 0,
            sentence_tokens: Spread::default(),
            message_lengths: Spread::default(),
            vocabulary_total: 0,
            vocabulary_unique: 0,
            counts: counts.iter().copied().collect(),
        }
    }
}

fn lexicon_hits(message: &str, words: &[&str]) -> usize {
    word_tokens(message)
        .filter(|token| words.contains(&token.as_str()))
        .count()
}

/// Every segment delimited by a run of `.`, `!` or `?`, including a trailing
/// unterminated one.
pub fn sentence_units(text: &str) -> Vec<&str> {
    SENTENCE_BREAK_RE.split(text).collect()
}

/// Non-blank segments closed by terminal punctuation.  Text after the last
/// terminator is not a sentence.
pub fn terminated_sentences(text: &str) -> Vec<&str> {
    let mut units = sentence_units(text);
    units.pop();
    units.retain(|unit| !unit.trim().is_empty());
    units
}
