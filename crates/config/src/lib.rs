use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ── Analyzer config ───────────────────────────────────────────────────────────

/// Tunables for the personalization miner.
///
/// Classifier thresholds are not configurable; they live in static rule tables
/// inside the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Maximum number of signature phrases kept, most frequent first.
    pub signature_phrase_limit: usize,
    /// Maximum number of common words kept, most frequent first.
    pub common_word_limit: usize,
    /// Sentence-like units shorter than this (after trimming) are ignored when
    /// mining signature phrases.
    pub min_phrase_chars: usize,
    /// More than this many emoji in the corpus adds the `heavy emoji usage` quirk.
    pub heavy_emoji_threshold: usize,
    /// A reference word counts as avoided when its share of the total word
    /// count falls below this fraction.
    pub avoided_word_rate: f64,
    /// Function words checked for avoidance, reported in this order.
    pub reference_words: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            signature_phrase_limit: 5,
            common_word_limit: 10,
            min_phrase_chars: 10,
            heavy_emoji_threshold: 5,
            avoided_word_rate: 0.01,
            reference_words: [
                "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
            ]
            .iter()
            .map(|word| word.to_string())
            .collect(),
        }
    }
}

// ── Store config ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON document holding every saved profile.  Overridden by the
    /// `TONE_STORE_PATH` environment variable when set.
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: ".tone/profiles.json".to_string(),
        }
    }
}

// ── Logging config ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for daily rolling log files.  Empty disables file logging.
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub analyzer: AnalyzerConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::default();
        if let Ok(raw) = fs::read_to_string(path) {
            config = toml::from_str(&raw)
                .with_context(|| format!("invalid config file {}", path.display()))?;
        }

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let rendered = toml::to_string_pretty(self)?;
        fs::write(path, rendered)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = non_empty_env("TONE_STORE_PATH") {
            self.store.path = value;
        }
        if let Some(value) = non_empty_env("TONE_LOG_DIR") {
            self.logging.directory = value;
        }
        if let Some(value) = non_empty_env("TONE_LOG_LEVEL") {
            self.logging.level = value;
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

// ── Tests ────────────────────────────────────────────────────────────────────
