#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use quiz_core::{Clock, LogTimeZone};
pub use sessions as session;

pub use error::SessionError;
pub use sessions::{
    AnswerFeedback, DEFAULT_QUESTIONS_PER_QUIZ, FinalResult, QuestionView, QuizLoopService,
    QuizSession, SaveStatus, SessionProgress, SessionState,
};
