use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;

use quiz_core::model::{AnswerLetter, PresentedQuestion, QuestionBank, QuestionRecord};

use super::progress::SessionProgress;
use super::view::AnswerFeedback;
use crate::error::SessionError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Finished,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One participant's run through a sampled question sequence.
///
/// Steps through the sampled questions in order. Each question's answer order
/// is shuffled once when first presented and reused until it is answered, so
/// the order shown and the order graded are always the same.
pub struct QuizSession {
    name: String,
    questions: Vec<QuestionRecord>,
    current: usize,
    score: Vec<bool>,
    presented: Option<[usize; 4]>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    saved: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            questions: Vec::new(),
            current: 0,
            score: Vec::new(),
            presented: None,
            started_at: None,
            completed_at: None,
            saved: false,
        }
    }

    /// Sample up to `count` questions from `topics` and begin the quiz.
    ///
    /// On error the session stays `NotStarted`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyStarted` if called twice, and
    /// `SessionError::EmptySelection` if the topics hold no questions.
    pub fn start<S, R>(
        &mut self,
        bank: &QuestionBank,
        topics: &[S],
        count: usize,
        started_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<(), SessionError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        if self.state() != SessionState::NotStarted {
            return Err(SessionError::AlreadyStarted);
        }
        if count == 0 {
            return Err(SessionError::EmptySelection);
        }
        let questions = bank
            .sample(topics, count, rng)
            .map_err(|_| SessionError::EmptySelection)?;

        self.questions = questions;
        self.current = 0;
        self.score.clear();
        self.presented = None;
        self.started_at = Some(started_at);
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.started_at.is_none() {
            SessionState::NotStarted
        } else if self.completed_at.is_none() {
            SessionState::InProgress
        } else {
            SessionState::Finished
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    /// One entry per answered question, `true` when correct.
    #[must_use]
    pub fn score_history(&self) -> &[bool] {
        &self.score
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.questions.len(),
            answered: self.score.len(),
            remaining: self.questions.len().saturating_sub(self.current),
            is_complete: self.is_complete(),
        }
    }

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        match self.state() {
            SessionState::NotStarted => Err(SessionError::NotStarted),
            SessionState::InProgress => Ok(()),
            SessionState::Finished => Err(SessionError::Completed),
        }
    }

    /// The question at the cursor with its answers in display order.
    ///
    /// The first call for a question draws the shuffle; later calls reuse it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` or `SessionError::Completed` outside `InProgress`.
    pub fn current_question<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<PresentedQuestion<'_>, SessionError> {
        self.ensure_in_progress()?;
        let record = &self.questions[self.current];
        let presented = match self.presented.and_then(|order| record.present_in_order(order)) {
            Some(presented) => presented,
            None => {
                let presented = record.present(rng);
                self.presented = Some(presented.order());
                presented
            }
        };
        Ok(presented)
    }

    /// Grade the chosen letter against the presented order and advance.
    ///
    /// With no letter the session is left untouched so the same question can be re-served.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSelection` when `letter` is `None`,
    /// `SessionError::NotPresented` if the current question was never shown,
    /// and `SessionError::NotStarted`/`SessionError::Completed` outside `InProgress`.
    pub fn submit(
        &mut self,
        letter: Option<AnswerLetter>,
        answered_at: DateTime<Utc>,
    ) -> Result<AnswerFeedback, SessionError> {
        self.ensure_in_progress()?;
        let letter = letter.ok_or(SessionError::NoSelection)?;
        let order = self.presented.ok_or(SessionError::NotPresented)?;
        let record = &self.questions[self.current];
        let presented = record
            .present_in_order(order)
            .ok_or(SessionError::NotPresented)?;

        let was_correct = presented.grade(letter);
        let mut feedback = AnswerFeedback {
            question_id: record.id(),
            chosen: letter,
            was_correct,
            correct_letter: presented.correct_letter(),
            correct_text: record.correct_answer().display().to_owned(),
            explanation: record.explanation().to_owned(),
            explanation_pages: record.explanation_pages().to_vec(),
            is_finished: false,
            save: None,
        };

        self.score.push(was_correct);
        self.current += 1;
        self.presented = None;
        if self.current >= self.questions.len() {
            self.completed_at = Some(answered_at);
        }
        feedback.is_finished = self.is_complete();
        Ok(feedback)
    }

    /// `(correct, total)` for a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` until the last answer is submitted.
    pub fn result(&self) -> Result<(usize, usize), SessionError> {
        if !self.is_complete() {
            return Err(SessionError::NotFinished);
        }
        let correct = self.score.iter().filter(|&&ok| ok).count();
        Ok((correct, self.score.len()))
    }

    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub(crate) fn mark_saved(&mut self) {
        self.saved = true;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("name", &self.name)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score_len", &self.score.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .field("saved", &self.saved)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
