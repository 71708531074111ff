//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;

/// Errors emitted by quiz sessions and the quiz loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for the selected topics")]
    EmptySelection,
    #[error("participant name must not be empty")]
    MissingName,
    #[error("no answer selected")]
    NoSelection,
    #[error("not an answer option: {raw:?}")]
    InvalidSelection { raw: String },
    #[error("session has not started")]
    NotStarted,
    #[error("session already started")]
    AlreadyStarted,
    #[error("current question has not been presented")]
    NotPresented,
    #[error("session already completed")]
    Completed,
    #[error("session is not finished")]
    NotFinished,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
