#![forbid(unsafe_code)]

pub mod attempt_log;
pub mod quiz_file;
pub mod repository;
pub mod sqlite;

pub use attempt_log::FileAttemptLog;
pub use quiz_file::JsonQuizFile;
pub use repository::{
    AttemptLog, AttemptRecord, ExecutionError, InMemoryRepository, QuizSink, QuizSource,
    StatementExecutor, StorageError,
};
pub use sqlite::{SqliteInitError, SqliteSession};
