mod progress;
mod session;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use session::{QuizSession, SessionState};
pub use view::{AnswerFeedback, FinalResult, QuestionView, SaveStatus};
pub use workflow::{DEFAULT_QUESTIONS_PER_QUIZ, QuizLoopService};
