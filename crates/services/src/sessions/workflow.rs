use std::sync::Arc;

use quiz_core::model::{AnswerLetter, QuestionBank, ResultRecord, TopicSelection};
use quiz_core::{Clock, LogTimeZone};
use storage::ResultLog;

use super::session::QuizSession;
use super::view::{AnswerFeedback, FinalResult, QuestionView, SaveStatus};
use crate::error::SessionError;

/// Questions drawn per session unless configured otherwise.
pub const DEFAULT_QUESTIONS_PER_QUIZ: usize = 10;

/// Orchestrates session start, answering, and result logging for a presentation layer.
///
/// Holds only shared, read-only state; each participant's `QuizSession` is owned by the caller.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    results: Arc<dyn ResultLog>,
    questions_per_quiz: usize,
    log_zone: LogTimeZone,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, bank: Arc<QuestionBank>, results: Arc<dyn ResultLog>) -> Self {
        Self {
            clock,
            bank,
            results,
            questions_per_quiz: DEFAULT_QUESTIONS_PER_QUIZ,
            log_zone: LogTimeZone::default(),
        }
    }

    /// Number of questions to draw per session; zero is raised to one.
    #[must_use]
    pub fn with_questions_per_quiz(mut self, count: usize) -> Self {
        self.questions_per_quiz = count.max(1);
        self
    }

    #[must_use]
    pub fn with_log_zone(mut self, zone: LogTimeZone) -> Self {
        self.log_zone = zone;
        self
    }

    #[must_use]
    pub fn questions_per_quiz(&self) -> usize {
        self.questions_per_quiz
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Topic names in the order the question file introduced them.
    #[must_use]
    pub fn list_topics(&self) -> Vec<String> {
        self.bank.topics().map(str::to_owned).collect()
    }

    /// Start a session for `name` over the selected topics.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MissingName` for a blank name and
    /// `SessionError::EmptySelection` if the topics hold no questions.
    pub fn start_session(
        &self,
        name: &str,
        selection: &TopicSelection,
    ) -> Result<QuizSession, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::MissingName);
        }
        let topics = selection.ordered(&self.bank);
        let mut session = QuizSession::new(name);
        session.start(
            &self.bank,
            topics.as_slice(),
            self.questions_per_quiz,
            self.clock.now(),
            &mut rand::rng(),
        )?;
        tracing::info!(
            name,
            topics = ?topics,
            questions = session.questions().len(),
            "quiz session started"
        );
        Ok(session)
    }

    /// The question to show now, shuffled on first display.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` or `SessionError::Completed` outside a running session.
    pub fn current_question(&self, session: &mut QuizSession) -> Result<QuestionView, SessionError> {
        let progress = session.progress();
        let presented = session.current_question(&mut rand::rng())?;
        let number = progress.current_number().ok_or(SessionError::Completed)?;
        Ok(QuestionView::from_presented(&presented, number, progress.total))
    }

    /// Submit raw user input for the current question.
    ///
    /// Blank input is `NoSelection`; anything other than a lone A–D (optionally
    /// followed by `.` and text) is `InvalidSelection`.
    /// Neither changes the session. The final answer also appends the result to the
    /// log; a failed write is reported in `AnswerFeedback::save`, not as an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for invalid input or when the session is not in progress.
    pub fn submit_answer(
        &self,
        session: &mut QuizSession,
        raw: &str,
    ) -> Result<AnswerFeedback, SessionError> {
        if raw.trim().is_empty() {
            return Err(SessionError::NoSelection);
        }
        let letter: AnswerLetter = raw.parse().map_err(|_| SessionError::InvalidSelection {
            raw: raw.to_owned(),
        })?;
        self.submit_letter(session, Some(letter))
    }

    /// Submit an already-parsed choice; `None` means nothing was selected.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when nothing was selected or the session is not in progress.
    pub fn submit_letter(
        &self,
        session: &mut QuizSession,
        letter: Option<AnswerLetter>,
    ) -> Result<AnswerFeedback, SessionError> {
        let mut feedback = session.submit(letter, self.clock.now())?;
        tracing::debug!(
            question = %feedback.question_id,
            correct = feedback.was_correct,
            "answer submitted"
        );

        if feedback.is_finished {
            let status = match self.save_result(session) {
                Ok(()) => SaveStatus::Saved,
                Err(err) => {
                    tracing::warn!(error = %err, "quiz result computed but not saved");
                    SaveStatus::Failed {
                        reason: err.to_string(),
                    }
                }
            };
            feedback.save = Some(status);
        }
        Ok(feedback)
    }

    /// Final score of a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` until the last answer is in.
    pub fn final_result(&self, session: &QuizSession) -> Result<FinalResult, SessionError> {
        let (correct, total) = session.result()?;
        let started_at = session.started_at().ok_or(SessionError::NotStarted)?;
        let completed_at = session.completed_at().ok_or(SessionError::NotFinished)?;
        Ok(FinalResult {
            name: session.name().to_owned(),
            correct,
            total,
            started_at,
            completed_at,
            saved: session.is_saved(),
        })
    }

    /// Retry saving a finished session's result.
    ///
    /// This is useful when the final append failed (e.g. the log file was locked).
    /// A session already saved is not written twice.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` for an unfinished session and
    /// `SessionError::Storage` if the write fails again.
    pub fn finalize_result(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        if session.is_saved() {
            return Ok(());
        }
        self.save_result(session)
    }

    fn save_result(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        let (correct, total) = session.result()?;
        let completed_at = session.completed_at().ok_or(SessionError::NotFinished)?;
        let record = ResultRecord::new(
            session.name(),
            self.log_zone.wall_clock(completed_at),
            correct,
            total,
        );
        self.results.append_result(&record)?;
        session.mark_saved();
        tracing::info!(name = session.name(), score = %record.score(), "quiz result saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerText, QuestionId, QuestionRecord};
    use quiz_core::time::fixed_now;
    use storage::{InMemoryRepository, StorageError};

    struct FailingLog;

    impl ResultLog for FailingLog {
        fn append_result(&self, _record: &ResultRecord) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }

        fn list_results(&self) -> Result<Vec<ResultRecord>, StorageError> {
            Ok(Vec::new())
        }
    }

    fn build_bank() -> QuestionBank {
        (1..=4)
            .map(|id| {
                QuestionRecord::new(
                    QuestionId::new(id),
                    if id <= 2 { "Licensing" } else { "Disclosure" },
                    AnswerText::plain(format!("Q{id}")),
                    AnswerText::plain("yes"),
                    [
                        AnswerText::plain("no"),
                        AnswerText::plain("maybe"),
                        AnswerText::plain("never"),
                    ],
                )
                .with_explanation("see the Act", vec![3, 4])
            })
            .collect()
    }

    fn build_service(results: Arc<dyn ResultLog>) -> QuizLoopService {
        QuizLoopService::new(Clock::fixed(fixed_now()), Arc::new(build_bank()), results)
            .with_log_zone(LogTimeZone::utc())
    }

    fn selection(topics: &[&str]) -> TopicSelection {
        topics.iter().copied().collect()
    }

    fn answer_all_correct(service: &QuizLoopService, session: &mut QuizSession) -> AnswerFeedback {
        loop {
            let view = service.current_question(session).unwrap();
            let letter = view
                .options
                .iter()
                .find(|(_, text)| text == "yes")
                .map(|(letter, _)| *letter)
                .unwrap();
            let feedback = service.submit_letter(session, Some(letter)).unwrap();
            assert!(feedback.was_correct);
            if feedback.is_finished {
                return feedback;
            }
        }
    }

    #[test]
    fn lists_topics_in_file_order() {
        let service = build_service(Arc::new(InMemoryRepository::new()));
        assert_eq!(service.list_topics(), vec!["Licensing", "Disclosure"]);
        assert_eq!(service.questions_per_quiz(), DEFAULT_QUESTIONS_PER_QUIZ);
    }

    #[test]
    fn blank_name_and_empty_selection_are_rejected() {
        let service = build_service(Arc::new(InMemoryRepository::new()));
        assert!(matches!(
            service.start_session("  ", &selection(&["Licensing"])),
            Err(SessionError::MissingName)
        ));
        assert!(matches!(
            service.start_session("Ada", &TopicSelection::new()),
            Err(SessionError::EmptySelection)
        ));
    }

    #[test]
    fn raw_input_is_validated_without_state_change() {
        let service = build_service(Arc::new(InMemoryRepository::new()));
        let mut session = service.start_session("Ada", &selection(&["Licensing"])).unwrap();
        let view = service.current_question(&mut session).unwrap();
        assert_eq!(view.number, 1);
        assert_eq!(view.total, 2);

        assert!(matches!(
            service.submit_answer(&mut session, ""),
            Err(SessionError::NoSelection)
        ));
        for raw in ["E", "dunno", "apple"] {
            assert!(matches!(
                service.submit_answer(&mut session, raw),
                Err(SessionError::InvalidSelection { .. })
            ));
        }
        assert_eq!(session.progress().answered, 0);
        assert_eq!(service.current_question(&mut session).unwrap(), view);

        let feedback = service.submit_answer(&mut session, "a").unwrap();
        assert_eq!(feedback.chosen, AnswerLetter::A);
        assert_eq!(feedback.explanation_pages, vec![3, 4]);
        assert_eq!(service.current_question(&mut session).unwrap().number, 2);
    }

    #[test]
    fn finishing_appends_one_result() {
        let repo = InMemoryRepository::new();
        let service = build_service(Arc::new(repo.clone()));
        let mut session = service
            .start_session("Ada", &selection(&["Licensing", "Disclosure"]))
            .unwrap();

        let last = answer_all_correct(&service, &mut session);
        assert_eq!(last.save, Some(SaveStatus::Saved));

        let result = service.final_result(&session).unwrap();
        assert_eq!((result.correct, result.total), (4, 4));
        assert!(result.saved);

        let logged = repo.list_results().unwrap();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].score(), "4/4");
        assert_eq!(logged[0].date(), "2023-11-14");
        assert_eq!(logged[0].time(), "22:13:20");

        service.finalize_result(&mut session).unwrap();
        assert_eq!(repo.list_results().unwrap().len(), 1);
    }

    #[test]
    fn failed_save_keeps_the_result() {
        let service = build_service(Arc::new(FailingLog));
        let mut session = service.start_session("Ada", &selection(&["Disclosure"])).unwrap();

        let last = answer_all_correct(&service, &mut session);
        assert!(matches!(last.save, Some(SaveStatus::Failed { .. })));

        let result = service.final_result(&session).unwrap();
        assert_eq!((result.correct, result.total), (2, 2));
        assert!(!result.saved);
        assert!(matches!(
            service.finalize_result(&mut session),
            Err(SessionError::Storage(_))
        ));
    }

    #[test]
    fn final_result_requires_a_finished_session() {
        let service = build_service(Arc::new(InMemoryRepository::new()));
        let mut session = service.start_session("Ada", &selection(&["Licensing"])).unwrap();
        assert!(matches!(
            service.final_result(&session),
            Err(SessionError::NotFinished)
        ));
        assert!(matches!(
            service.finalize_result(&mut session),
            Err(SessionError::NotFinished)
        ));
    }
}
