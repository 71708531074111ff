use std::path::PathBuf;

use clap::Parser;
use clap::builder::TypedValueParser;

/// Run a multiple-choice quiz in the terminal and append the score to a results log.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "quiz", version, about, long_about = None)]
pub struct Args {
    /// Question bank CSV (topic, question, correct_answer, wrong_answer_1..3,
    /// explanation, explanation_pages).
    #[arg(long, env = "QUIZ_QUESTIONS", default_value = "question_bank.csv")]
    pub questions: PathBuf,

    /// Results log CSV; created with a header row on first use.
    #[arg(long, env = "QUIZ_RESULTS", default_value = "quiz_results.csv")]
    pub results: PathBuf,

    /// Questions drawn per quiz.
    #[arg(long, env = "QUIZ_QUESTION_COUNT", default_value_t = services::DEFAULT_QUESTIONS_PER_QUIZ,
          value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub count: usize,

    /// Reject malformed page lists and duplicate answers instead of recovering.
    #[arg(long, env = "QUIZ_STRICT")]
    pub strict: bool,

    /// Name shown in the welcome banner.
    #[arg(long, env = "QUIZ_TITLE", default_value = "Quiz")]
    pub title: String,

    /// Verbose logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Log filter used unless `RUST_LOG` is set.
    #[must_use]
    pub fn default_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}
