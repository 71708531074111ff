//! Line-oriented terminal front end for the quiz loop.

use std::io::{BufRead, Write};

use services::{FinalResult, QuizLoopService, QuizSession, SessionError, SessionState};

use crate::error::UiError;
use crate::vm::{
    TopicPickerVm, feedback_lines, parse_topic_command, question_lines, result_line, save_warning,
};

/// How a terminal run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Finished(FinalResult),
    /// Input ended before the quiz finished; nothing was logged.
    Abandoned,
}

/// Drives one participant through topic selection, the quiz, and the final score.
pub struct TerminalUi<'a, R, W> {
    service: &'a QuizLoopService,
    input: R,
    output: W,
    title: String,
}

impl<'a, R: BufRead, W: Write> TerminalUi<'a, R, W> {
    #[must_use]
    pub fn new(service: &'a QuizLoopService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
            title: "Quiz".to_owned(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the UI and hand back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run a whole quiz.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Io` if the terminal cannot be read or written, and
    /// `UiError::Session` for session failures other than recoverable input mistakes.
    pub fn run(&mut self) -> Result<RunOutcome, UiError> {
        writeln!(
            self.output,
            "Welcome to the {}. This quiz contains {} questions. You may change your answer before submitting. Good luck!",
            self.title,
            self.service.questions_per_quiz()
        )?;

        let Some(mut session) = self.start_session()? else {
            return Ok(RunOutcome::Abandoned);
        };
        self.play(&mut session)
    }

    fn read_line(&mut self) -> Result<Option<String>, UiError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    fn start_session(&mut self) -> Result<Option<QuizSession>, UiError> {
        loop {
            let Some(picker) = self.pick_topics()? else {
                return Ok(None);
            };
            writeln!(
                self.output,
                "Selected topics: {}",
                picker.selected_names().join(", ")
            )?;
            writeln!(
                self.output,
                "Topics selected. Please enter your name to start the quiz."
            )?;

            let Some(name) = self.prompt_name()? else {
                return Ok(None);
            };
            writeln!(self.output, "Starting quiz for {name}")?;

            match self.service.start_session(&name, picker.selection()) {
                Ok(session) => return Ok(Some(session)),
                Err(SessionError::EmptySelection) => {
                    writeln!(
                        self.output,
                        "Error: No questions available for the selected topics."
                    )?;
                    writeln!(
                        self.output,
                        "Please make sure you've selected topics with available questions."
                    )?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn pick_topics(&mut self) -> Result<Option<TopicPickerVm>, UiError> {
        let mut picker = TopicPickerVm::new(self.service.list_topics());
        loop {
            writeln!(self.output)?;
            for row in picker.rows() {
                let mark = if row.selected { 'x' } else { ' ' };
                writeln!(self.output, "  [{mark}] {}. {}", row.number, row.name)?;
            }
            write!(
                self.output,
                "Toggle topics by number, 'all' to select all, 'none' to deselect all, or press Enter to confirm: "
            )?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_topic_command(&line, picker.topic_count()) {
                Ok(command) => {
                    if picker.apply(command) {
                        return Ok(Some(picker));
                    }
                }
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
    }

    fn prompt_name(&mut self) -> Result<Option<String>, UiError> {
        loop {
            write!(self.output, "Your Name: ")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            let name = line.trim();
            if !name.is_empty() {
                return Ok(Some(name.to_owned()));
            }
            writeln!(
                self.output,
                "Please enter your name before starting the quiz."
            )?;
        }
    }

    fn play(&mut self, session: &mut QuizSession) -> Result<RunOutcome, UiError> {
        while session.state() == SessionState::InProgress {
            let view = self.service.current_question(session)?;
            writeln!(self.output)?;
            for line in question_lines(&view) {
                writeln!(self.output, "{line}")?;
            }

            let feedback = loop {
                write!(self.output, "Your answer: ")?;
                let Some(line) = self.read_line()? else {
                    tracing::debug!(name = session.name(), "input closed mid-quiz");
                    return Ok(RunOutcome::Abandoned);
                };
                match self.service.submit_answer(session, &line) {
                    Ok(feedback) => break feedback,
                    Err(SessionError::NoSelection) => {
                        writeln!(self.output, "Please select an answer.")?;
                    }
                    Err(SessionError::InvalidSelection { .. }) => {
                        writeln!(self.output, "Please choose one of A, B, C or D.")?;
                    }
                    Err(err) => return Err(err.into()),
                }
            };

            writeln!(self.output)?;
            for line in feedback_lines(&feedback) {
                writeln!(self.output, "{line}")?;
            }
            if let Some(warning) = feedback.save.as_ref().and_then(save_warning) {
                writeln!(self.output)?;
                writeln!(self.output, "{warning}")?;
            }
        }

        let result = self.service.final_result(session)?;
        writeln!(self.output)?;
        writeln!(self.output, "{}", result_line(&result))?;
        self.output.flush()?;
        Ok(RunOutcome::Finished(result))
    }
}
