//! Closed label sets for every categorical profile dimension.
//!
//! Each enum serialises to its kebab-case label and carries exactly one fixed
//! human-readable description, used verbatim by the report renderer.  These
//! sets are the single source of truth for both the classifiers and the
//! schema validator.

use std::fmt;

macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $label:literal, $description:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Every accepted label, in declaration order.
            pub const LABELS: &'static [&'static str] = &[$($label,)+];

            /// Canonical label used in JSON and in rendered reports.
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Fixed description shown next to the label in reports.
            pub fn description(self) -> &'static str {
                match self {
                    $(Self::$variant => $description,)+
                }
            }

            /// Parse an exact label.  Unknown labels yield `None`.
            pub fn from_label(s: &str) -> Option<Self> {
                match s {
                    $($label => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

// ── Core communication style ─────────────────────────────────────────────────

label_enum! {
    Formality {
        Formal => "formal", "Professional language, no contractions, formal vocabulary";
        SemiFormal => "semi-formal", "Some contractions, mixed formal/casual vocabulary";
        Casual => "casual", "Frequent contractions, everyday language, some slang";
        SlangHeavy => "slang-heavy", "Heavy use of slang, internet abbreviations, informal expressions";
    }
}

label_enum! {
    Politeness {
        Polite => "polite", "Frequent use of \"please\", \"thank you\", \"could you\", apologetic language";
        Direct => "direct", "Straightforward communication, minimal politeness markers";
        Blunt => "blunt", "Very direct, potentially harsh, minimal softening language";
        Neutral => "neutral", "Neither overtly polite nor impolite; balanced tone";
    }
}

label_enum! {
    Emotion {
        Positive => "positive", "Upbeat, optimistic language and sentiment";
        Negative => "negative", "Pessimistic, critical, or frustrated tone";
        Neutral => "neutral", "Balanced emotional expression";
        Mixed => "mixed", "Combination of different emotional tones";
        Sarcastic => "sarcastic", "Ironic, mocking, or satirical emotional tone";
        Enthusiastic => "enthusiastic", "Excited, passionate, and energetic emotional tone";
        Frustrated => "frustrated", "Impatient, annoyed, or dissatisfied emotional tone";
    }
}

label_enum! {
    Conciseness {
        Concise => "concise", "Short, to-the-point messages";
        Detailed => "detailed", "Thorough explanations with additional context";
        Verbose => "verbose", "Lengthy, detailed communications with extensive explanations";
        Balanced => "balanced", "Balanced between concise and detailed";
    }
}

label_enum! {
    Energy {
        HighEnergy => "high-energy", "Lots of exclamations, emojis, caps";
        Moderate => "moderate", "Balanced energy level";
        LowEnergy => "low-energy", "Calm, measured, minimal emphasis";
        Flat => "flat", "Monotone, lacking energy";
        Normal => "normal", "Standard, expected energy level";
    }
}

// ── Personality traits ───────────────────────────────────────────────────────

label_enum! {
    Humor {
        None => "none", "No humor detected";
        Subtle => "subtle", "Occasional, understated humor";
        Moderate => "moderate", "Regular but balanced use of humor";
        Sarcastic => "sarcastic", "Ironic, mocking, or satirical humor";
        Playful => "playful", "Light-hearted and fun humor";
        Heavy => "heavy", "Frequent, intense use of humor";
    }
}

label_enum! {
    Technicality {
        Expert => "expert", "Expert-level technical language and concepts";
        Advanced => "advanced", "Advanced technical terminology and explanations";
        Intermediate => "intermediate", "Intermediate technical terms, some explanations";
        Basic => "basic", "Basic technical terms with explanations";
        NonTechnical => "non-technical", "No technical terminology used";
    }
}

label_enum! {
    Empathy {
        Low => "low", "Minimal emotional consideration for others";
        Moderate => "moderate", "Balanced emotional consideration";
        High => "high", "High level of emotional consideration and understanding";
        VeryHigh => "very-high", "Exceptionally empathetic and understanding";
    }
}

label_enum! {
    Confidence {
        Low => "low", "Hesitant, uncertain language";
        Moderate => "moderate", "Balanced confidence";
        High => "high", "Assertive, self-assured language";
        Overconfident => "overconfident", "Overly assertive, potentially dismissive of others";
        Assertive => "assertive", "Confident and direct, but not overbearing";
        Confident => "confident", "Self-assured and positive";
        Tentative => "tentative", "Cautious, hesitant, or unsure";
    }
}

// ── Communication patterns ───────────────────────────────────────────────────

label_enum! {
    QuestionStyle {
        Rhetorical => "rhetorical", "Questions used for effect rather than to get information";
        Clarifying => "clarifying", "Questions that seek to understand better";
        Probing => "probing", "In-depth questions that explore a topic";
        Leading => "leading", "Questions that suggest a particular answer";
        Direct => "direct", "Straightforward, explicit questions";
        Indirect => "indirect", "Subtle, implied questions";
    }
}

label_enum! {
    GreetingStyle {
        Formal => "formal", "Professional, traditional greetings";
        Warm => "warm", "Friendly, welcoming greetings";
        Casual => "casual", "Informal, relaxed greetings";
        None => "none", "No greeting, gets straight to the point";
        Minimal => "minimal", "Minimal or token greeting";
    }
}

label_enum! {
    ClosingStyle {
        Formal => "formal", "Professional sign-offs";
        Warm => "warm", "Friendly, personal closings";
        Abrupt => "abrupt", "Ends messages suddenly";
        None => "none", "No closing, ends with the last point";
        Casual => "casual", "Informal, relaxed closing";
    }
}

label_enum! {
    /// Never derived from text: a corpus carries no timing or turn-taking
    /// data, so profiles always report [`InterruptionStyle::Moderate`].
    InterruptionStyle {
        Frequent => "frequent", "Interrupts often during conversation";
        Moderate => "moderate", "Occasionally interrupts, but not disruptive";
        Rare => "rare", "Rarely interrupts, generally waits for others to finish";
        Never => "never", "Never interrupts, always waits for others to finish speaking";
    }
}

label_enum! {
    ResponsePattern {
        Quick => "quick", "Responds rapidly, often without delay";
        Deliberate => "deliberate", "Takes time to consider before responding";
        Thoughtful => "thoughtful", "Gives well-considered, reflective responses";
        Reactive => "reactive", "Responds directly to the previous message";
        Spontaneous => "spontaneous", "Responds in an unplanned, impulsive manner";
        Immediate => "immediate", "Replies instantly, with little to no pause";
    }
}

// ── Linguistic characteristics ───────────────────────────────────────────────

label_enum! {
    VocabularyLevel {
        Basic => "basic", "Simple, everyday vocabulary";
        Intermediate => "intermediate", "Good range of vocabulary";
        Advanced => "advanced", "Sophisticated word choice";
        Sophisticated => "sophisticated", "Sophisticated vocabulary in short, punchy sentences";
    }
}

label_enum! {
    SentenceComplexity {
        Simple => "simple", "Short, straightforward sentences";
        Moderate => "moderate", "Mix of simple and complex sentences";
        Complex => "complex", "Longer, more complex sentence structures";
        Varied => "varied", "Wide range of sentence structures";
        Compound => "compound", "Sentences with two or more independent clauses";
    }
}

label_enum! {
    DiscourseMarkers {
        Minimal => "minimal", "Few transition words or phrases";
        Moderate => "moderate", "Appropriate use of transitions";
        Excessive => "excessive", "Overuse of transition words and phrases";
        Frequent => "frequent", "Frequent use of discourse markers";
    }
}

// ── Behavioral patterns ──────────────────────────────────────────────────────

label_enum! {
    ConflictStyle {
        Avoidant => "avoidant", "Avoids direct confrontation";
        Accommodating => "accommodating", "Seeks to please others in conflict";
        Competitive => "competitive", "Seeks to win in conflict situations";
        Collaborative => "collaborative", "Works with others to find solutions";
        Compromising => "compromising", "Seeks middle ground in conflicts";
    }
}

label_enum! {
    FeedbackStyle {
        Direct => "direct", "Straightforward, to-the-point feedback";
        Constructive => "constructive", "Balanced feedback with suggestions";
        Sandwich => "sandwich", "Negative feedback between positive comments";
        Indirect => "indirect", "Subtle, implied feedback";
        Gentle => "gentle", "Soft, kind, and encouraging feedback";
        Harsh => "harsh", "Severe, critical, or blunt feedback";
    }
}
