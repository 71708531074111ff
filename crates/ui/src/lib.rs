#![forbid(unsafe_code)]

pub mod error;
pub mod terminal;
pub mod vm;

pub use error::UiError;
pub use terminal::{RunOutcome, TerminalUi};
