#![forbid(unsafe_code)]

pub mod command;
pub mod error;
pub mod sessions;
pub mod shell;

pub use quiz_core::Clock;
pub use sessions as session;

pub use command::{Command, CommandError};
pub use error::{ExportError, QuizLoadError, QuizSessionError};
pub use sessions::{
    Advance, DisplayMode, QuizLoopService, QuizSession, SessionProgress, SessionState,
    StatementReport,
};
pub use shell::{QuizShell, Response};
