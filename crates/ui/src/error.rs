use thiserror::Error;

use services::SessionError;

/// Errors that end a terminal run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UiError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
}
