use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("message corpus is empty: at least one non-blank message is required")]
    EmptyCorpus,
}

/// One person's messages in chronological order.
///
/// Blank and whitespace-only messages are dropped on construction; a corpus
/// always holds at least one message.  The newline-joined text is built once
/// and shared by every corpus-wide detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCorpus {
    messages: Vec<String>,
    text: String,
}

impl MessageCorpus {
    pub fn new<I, S>(messages: I) -> Result<Self, AnalyzerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages
            .into_iter()
            .map(Into::into)
            .filter(|message| !message.trim().is_empty())
            .collect();
        if messages.is_empty() {
            return Err(AnalyzerError::EmptyCorpus);
        }

        let text = messages.join("\n");
        Ok(Self { messages, text })
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// All messages joined with `\n`.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
