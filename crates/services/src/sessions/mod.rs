mod progress;
mod service;
pub mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::{ExportError, QuizLoadError, QuizSessionError};
pub use progress::SessionProgress;
pub use service::{Advance, DisplayMode, QuizSession, SessionState};
pub use workflow::{QuizLoopService, StatementReport};
