//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuizError;
use storage::{ExecutionError, StorageError};

/// Errors emitted by `QuizSession` transitions.
///
/// None of these are fatal; the shell turns each into a message and the
/// session keeps its state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizSessionError {
    #[error("quiz has no questions")]
    Empty,
    #[error("quiz already finished")]
    Finished,
    #[error("no solution available for this question")]
    NoSolutionAvailable,
    #[error("this question is not scored")]
    NotScorable,
    #[error("{0}")]
    Execution(#[from] ExecutionError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors emitted while writing a closed quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error("export failed: {0}")]
    Write(#[from] StorageError),
}

/// Errors emitted while preparing a quiz session. Fatal at startup.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizLoadError {
    #[error("quiz `{name}` not found")]
    NotFound { name: String },
    #[error("setup statement {number} failed: {source}", number = .index + 1)]
    Setup {
        index: usize,
        #[source]
        source: ExecutionError,
    },
    #[error("expected statement for question {number} failed: {source}", number = .index + 1)]
    Expectation {
        index: usize,
        #[source]
        source: ExecutionError,
    },
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Session(#[from] QuizSessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
