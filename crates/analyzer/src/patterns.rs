//! Static detector table for the feature extractor.
//!
//! Every detector is declared once as data (a word list, a regex, a
//! per-message lexicon, or a structural scanner) and compiled on first use
//! into a process-wide [`LazyLock`].  Nothing here is mutated after startup.

use std::sync::LazyLock;

use regex::Regex;

/// Everything the extractor counts.  Cue detectors are also read as presence
/// tests (`count > 0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Detector {
    Contraction,
    Slang,
    Emoji,
    PoliteMarker,
    Imperative,
    PositiveWord,
    NegativeWord,
    PositiveEmoji,
    NegativeEmoji,
    QuestionMark,
    ExclamationMark,
    CapsWord,
    Interjection,
    WordRepetition,
    ComplexPunctuation,
    PassiveVoice,
    FirstPerson,
    SecondPerson,
    ThirdPerson,
    Uncertainty,
    Confidence,
    Humor,
    Technical,
    Empathy,
    TimeMarker,
    SpatialMarker,
    SarcasmCue,
    RhetoricalCue,
    IndirectQuestionCue,
    FormalGreeting,
    WarmGreeting,
    Greeting,
    FormalClosing,
    WarmClosing,
    Closing,
    ExclamationRun,
    QuestionRun,
    EllipsisRun,
    ShoutedWord,
    CharacterRun,
}

/// How a detector matches.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Case-insensitive whole-word (or whole-phrase) alternation over the
    /// joined corpus text.
    Words(&'static [&'static str]),
    /// Raw regex over the joined corpus text.
    Pattern(&'static str),
    /// Case-folded token equality, evaluated message by message.
    Lexicon(&'static [&'static str]),
    /// Structural scanner for shapes the regex engine cannot express
    /// (it has no back-references).
    Scan(fn(&str) -> usize),
}

#[derive(Debug, Clone, Copy)]
pub struct LexicalPattern {
    pub detector: Detector,
    pub rule: Rule,
}

pub const SLANG_WORDS: &[&str] = &[
    "lol", "brb", "idk", "omg", "wtf", "btw", "tbh", "nvm", "imo", "fyi", "asap", "irl", "ngl",
    "fr", "no cap", "bet", "periodt",
];

pub const POLITE_MARKERS: &[&str] = &[
    "please", "could you", "thank you", "thanks", "appreciate", "grateful", "sorry", "excuse me",
    "pardon",
];

pub const INTERJECTIONS: &[&str] = &[
    "oh", "ah", "uh", "um", "er", "hmm", "well", "so", "like", "you know", "actually", "basically",
    "literally", "obviously",
];

pub const UNCERTAINTY_MARKERS: &[&str] = &[
    "maybe", "perhaps", "might", "could", "possibly", "probably", "i think", "i guess", "sort of",
    "kind of", "seems like",
];

pub const CONFIDENCE_MARKERS: &[&str] = &[
    "definitely", "certainly", "absolutely", "surely", "obviously", "clearly", "without doubt",
    "i know", "i believe",
];

pub const TECHNICAL_TERMS: &[&str] = &[
    "algorithm", "database", "api", "framework", "protocol", "interface", "configuration",
    "implementation", "optimization", "debugging",
];

pub const EMPATHY_MARKERS: &[&str] = &[
    "understand", "feel", "sorry", "hope", "wish", "care", "concern", "support", "help", "comfort",
];

pub const TIME_MARKERS: &[&str] = &[
    "now", "then", "before", "after", "soon", "later", "recently", "yesterday", "today",
    "tomorrow", "always", "never", "often", "sometimes",
];

pub const SPATIAL_MARKERS: &[&str] = &[
    "here", "there", "where", "everywhere", "somewhere", "above", "below", "inside", "outside",
    "near", "far", "left", "right",
];

pub const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "happy", "love", "fantastic", "awesome", "amazing", "wonderful", "excellent",
    "perfect", "brilliant", "outstanding", "superb", "marvelous",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "bad", "sad", "hate", "terrible", "awful", "frustrated", "angry", "disappointed", "upset",
    "annoyed", "furious", "devastated", "horrible", "dreadful",
];

pub static PATTERNS: &[LexicalPattern] = &[
    // register
    pattern(Detector::Contraction, Rule::Pattern(r"(?i)\b\w+n['’]t\b")),
    pattern(Detector::Slang, Rule::Words(SLANG_WORDS)),
    // politeness
    pattern(Detector::PoliteMarker, Rule::Words(POLITE_MARKERS)),
    pattern(Detector::Imperative, Rule::Pattern(r"(?m)^[A-Z][a-z]+\s+[a-z]+")),
    // sentiment
    pattern(Detector::PositiveWord, Rule::Lexicon(POSITIVE_WORDS)),
    pattern(Detector::NegativeWord, Rule::Lexicon(NEGATIVE_WORDS)),
    pattern(Detector::Emoji, Rule::Pattern(r"[\p{Emoji_Presentation}\x{2600}-\x{27BF}]")),
    pattern(Detector::PositiveEmoji, Rule::Pattern("😊|😀|👍|❤\u{FE0F}?|✨")),
    pattern(Detector::NegativeEmoji, Rule::Pattern("😡|😠|👎|💔|😢")),
    pattern(Detector::SarcasmCue, Rule::Pattern(r"(?i)\?{2,}|!\?|sarcasm|sarcastic|irony|ironic")),
    // punctuation
    pattern(Detector::QuestionMark, Rule::Pattern(r"\?")),
    pattern(Detector::ExclamationMark, Rule::Pattern("!")),
    pattern(Detector::CapsWord, Rule::Pattern(r"\b[A-Z]{2,}\b")),
    // discourse
    pattern(Detector::Interjection, Rule::Words(INTERJECTIONS)),
    pattern(Detector::WordRepetition, Rule::Scan(count_repeated_words)),
    // syntax
    pattern(Detector::ComplexPunctuation, Rule::Pattern(r"[,;:]\s+[a-z]")),
    pattern(Detector::PassiveVoice, Rule::Pattern(r"(?i)\b(?:was|were|been|being)\s+\w+ed\b")),
    // pronouns
    pattern(Detector::FirstPerson, Rule::Words(&["i", "me", "my", "mine", "myself"])),
    pattern(Detector::SecondPerson, Rule::Words(&["you", "your", "yours", "yourself"])),
    pattern(
        Detector::ThirdPerson,
        Rule::Words(&["he", "she", "it", "they", "him", "her", "them", "his", "hers", "theirs"]),
    ),
    // stance
    pattern(Detector::Uncertainty, Rule::Words(UNCERTAINTY_MARKERS)),
    pattern(Detector::Confidence, Rule::Words(CONFIDENCE_MARKERS)),
    // topic
    pattern(
        Detector::Humor,
        Rule::Pattern(r"(?i)\b(?:haha|lol|lmao|rofl|funny|hilarious|joke|kidding|just kidding|jk)\b|😄|😂|🤣"),
    ),
    pattern(Detector::Technical, Rule::Words(TECHNICAL_TERMS)),
    pattern(Detector::Empathy, Rule::Words(EMPATHY_MARKERS)),
    // deixis
    pattern(Detector::TimeMarker, Rule::Words(TIME_MARKERS)),
    pattern(Detector::SpatialMarker, Rule::Words(SPATIAL_MARKERS)),
    // questions
    pattern(Detector::RhetoricalCue, Rule::Pattern(r"(?i)rhetorical|don['’]t you think|right\?")),
    pattern(Detector::IndirectQuestionCue, Rule::Pattern(r"(?i)could you|would you|might you")),
    // greetings and closings
    pattern(Detector::FormalGreeting, Rule::Pattern(r"(?i)good (?:morning|afternoon|evening)")),
    pattern(Detector::WarmGreeting, Rule::Pattern(r"(?i)(?:hey|hi|hello) there")),
    pattern(
        Detector::Greeting,
        Rule::Pattern(r"(?im)^\s*(?:hi|hello|hey|good morning|good afternoon|good evening)\b"),
    ),
    pattern(Detector::FormalClosing, Rule::Pattern(r"(?i)sincerely|best regards|yours truly")),
    pattern(Detector::WarmClosing, Rule::Pattern(r"(?i)take care|talk soon|see you soon")),
    pattern(
        Detector::Closing,
        Rule::Words(&["bye", "goodbye", "see you", "talk to you", "take care", "cheers"]),
    ),
    // quirks
    pattern(Detector::ExclamationRun, Rule::Pattern("!{3,}")),
    pattern(Detector::QuestionRun, Rule::Pattern(r"\?{3,}")),
    pattern(Detector::EllipsisRun, Rule::Pattern(r"\.{3,}")),
    pattern(Detector::ShoutedWord, Rule::Pattern(r"\b[A-Z]{3,}\b")),
    pattern(Detector::CharacterRun, Rule::Scan(count_character_runs)),
];

const fn pattern(detector: Detector, rule: Rule) -> LexicalPattern {
    LexicalPattern {
        detector,
        rule,
    }
}

pub(crate) enum Matcher {
    Regex(Regex),
    Lexicon(&'static [&'static str]),
    Scan(fn(&str) -> usize),
}

pub(crate) struct CompiledPattern {
    pub detector: Detector,
    pub matcher: Matcher,
}

/// Compiled form of [`PATTERNS`], built on first access.
pub(crate) static COMPILED: LazyLock<Vec<CompiledPattern>> = LazyLock::new(|| {
    PATTERNS
        .iter()
        .map(|pattern| CompiledPattern {
            detector: pattern.detector,
            matcher: compile(pattern.rule),
        })
        .collect()
});

fn compile(rule: Rule) -> Matcher {
    match rule {
        Rule::Words(words) => Matcher::Regex(word_alternation(words)),
        Rule::Pattern(source) => {
            Matcher::Regex(Regex::new(source).expect("static detector pattern must compile"))
        }
        Rule::Lexicon(words) => Matcher::Lexicon(words),
        Rule::Scan(scan) => Matcher::Scan(scan),
    }
}

fn word_alternation(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
        .expect("static word list must compile")
}

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("static word pattern must compile"));

/// Count non-overlapping `word word` pairs (same word twice, separated only by
/// whitespace, compared case-insensitively).
pub fn count_repeated_words(text: &str) -> usize {
    let mut count = 0;
    let mut previous: Option<regex::Match<'_>> = None;
    for word in WORD_RE.find_iter(text) {
        if let Some(prev) = previous {
            let gap = &text[prev.end()..word.start()];
            let repeated = !gap.is_empty()
                && gap.chars().all(char::is_whitespace)
                && prev.as_str().to_lowercase() == word.as_str().to_lowercase();
            if repeated {
                count += 1;
                previous = None;
                continue;
            }
        }
        previous = Some(word);
    }
    count
}

/// Count runs of the same character repeated three or more times in a row.
/// Newlines never form a run.
pub fn count_character_runs(text: &str) -> usize {
    let mut count = 0;
    let mut current: Option<char> = None;
    let mut run = 0usize;
    for ch in text.chars() {
        if Some(ch) == current && ch != '\n' {
            run += 1;
            if run == 3 {
                count += 1;
            }
        } else {
            current = Some(ch);
            run = 1;
        }
    }
    count
}

/// Split `text` into case-folded word tokens on any non-word character.
pub fn word_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}
