use std::io;
use std::sync::Arc;

use clap::Parser;
use services::{Clock, QuizLoopService};
use storage::{LoadOptions, Storage};
use tracing_subscriber::EnvFilter;
use ui::{RunOutcome, TerminalUi};

mod config;

use config::Args;

fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.default_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::csv(
        &args.questions,
        &args.results,
        LoadOptions {
            strict: args.strict,
        },
    );

    let bank = storage.questions.load_bank().map_err(|e| {
        format!(
            "cannot load questions from {}: {e}",
            args.questions.display()
        )
    })?;
    if bank.is_empty() {
        return Err(format!("no questions found in {}", args.questions.display()).into());
    }

    let service = QuizLoopService::new(
        Clock::default_clock(),
        Arc::new(bank),
        Arc::clone(&storage.results),
    )
    .with_questions_per_quiz(args.count);

    let stdin = io::stdin();
    let mut terminal = TerminalUi::new(&service, stdin.lock(), io::stdout().lock())
        .with_title(args.title.clone());
    match terminal.run()? {
        RunOutcome::Finished(result) => {
            tracing::debug!(name = %result.name, saved = result.saved, "quiz finished");
        }
        RunOutcome::Abandoned => {
            tracing::info!("quiz abandoned before the last question");
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(&args);

    if let Err(err) = run(&args) {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
