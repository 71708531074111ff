use std::fmt;

use crate::literal::Literal;

/// Question or answer text as it arrives from a question file.
///
/// A cell is either plain prose or a structured literal carrying an
/// `answer` field plus optional metadata. Both resolve to one display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerText {
    Plain(String),
    Structured {
        answer: String,
        /// Remaining keys rendered as text, in source order.
        metadata: Vec<(String, String)>,
    },
}

impl AnswerText {
    /// Normalize a raw cell.
    ///
    /// Quoted strings are unquoted, dicts with an `answer` key become
    /// `Structured`, and anything else is kept verbatim.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match Literal::parse(raw) {
            Ok(Literal::Str(s)) => Self::Plain(s),
            Ok(lit @ Literal::Dict(_)) => match lit.get("answer") {
                Some(answer) => Self::Structured {
                    answer: answer.display_text(),
                    metadata: metadata_of(&lit),
                },
                None => Self::Plain(raw.to_owned()),
            },
            _ => Self::Plain(raw.to_owned()),
        }
    }

    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// The single string shown to a user and compared when grading.
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            AnswerText::Plain(text) => text,
            AnswerText::Structured { answer, .. } => answer,
        }
    }

    #[must_use]
    pub fn metadata(&self) -> &[(String, String)] {
        match self {
            AnswerText::Plain(_) => &[],
            AnswerText::Structured { metadata, .. } => metadata,
        }
    }

    #[must_use]
    pub fn is_structured(&self) -> bool {
        matches!(self, AnswerText::Structured { .. })
    }
}

fn metadata_of(lit: &Literal) -> Vec<(String, String)> {
    let Literal::Dict(entries) = lit else {
        return Vec::new();
    };
    entries
        .iter()
        .filter(|(k, _)| k.as_str() != Some("answer"))
        .map(|(k, v)| (k.display_text(), v.display_text()))
        .collect()
}

impl fmt::Display for AnswerText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

impl From<&str> for AnswerText {
    fn from(value: &str) -> Self {
        Self::plain(value)
    }
}
