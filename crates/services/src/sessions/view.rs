use chrono::{DateTime, Utc};

use quiz_core::model::{AnswerLetter, PresentedQuestion, QuestionId};

/// What the presentation layer needs to show one question.
///
/// Carries no formatting beyond the option letters; the adapter decides how to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub id: QuestionId,
    /// 1-based position within the session.
    pub number: usize,
    pub total: usize,
    pub topic: String,
    pub text: String,
    pub options: [(AnswerLetter, String); 4],
}

impl QuestionView {
    #[must_use]
    pub fn from_presented(presented: &PresentedQuestion<'_>, number: usize, total: usize) -> Self {
        let record = presented.record();
        Self {
            id: record.id(),
            number,
            total,
            topic: record.topic().to_owned(),
            text: record.question().display().to_owned(),
            options: presented
                .options()
                .map(|(letter, text)| (letter, text.to_owned())),
        }
    }
}

/// Whether a finished session's result reached the results log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    /// The score was computed but could not be written.
    Failed { reason: String },
}

/// Outcome of one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub question_id: QuestionId,
    pub chosen: AnswerLetter,
    pub was_correct: bool,
    pub correct_letter: AnswerLetter,
    pub correct_text: String,
    pub explanation: String,
    pub explanation_pages: Vec<i64>,
    pub is_finished: bool,
    /// Set on the final answer once a save was attempted.
    pub save: Option<SaveStatus>,
}

/// Final score of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalResult {
    pub name: String,
    pub correct: usize,
    pub total: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub saved: bool,
}
