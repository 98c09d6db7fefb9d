use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{Quiz, ResultSet};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid quiz: {0}")]
    Invalid(String),

    #[error("connection error: {0}")]
    Connection(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}

/// A statement the database refused or failed to run.
///
/// The message is shown to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ExecutionError {
    message: String,
}

impl ExecutionError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A correct submission worth remembering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    pub quiz: String,
    pub position: usize,
    pub statement: String,
    pub at: DateTime<Utc>,
}

/// Where quiz definitions come from.
#[async_trait]
pub trait QuizSource: Send + Sync {
    /// Load one quiz by name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no quiz has that name, or other
    /// storage errors if the source cannot be read or is invalid.
    async fn load_quiz(&self, name: &str) -> Result<Quiz, StorageError>;

    /// Names of every quiz in the source, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read.
    async fn quiz_names(&self) -> Result<Vec<String>, StorageError>;
}

/// Where quiz definitions are written to.
#[async_trait]
pub trait QuizSink: Send + Sync {
    /// Write `quiz` to `target`, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the target cannot be written.
    async fn write_quiz(&self, target: &Path, quiz: &Quiz) -> Result<(), StorageError>;
}

/// Runs raw statements against the live database.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Execute `sql` and collect every row it returns.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError` with the database's message on failure.
    async fn execute(&self, sql: &str) -> Result<ResultSet, ExecutionError>;
}

/// Append-only record of solved questions.
#[async_trait]
pub trait AttemptLog: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn append(&self, record: &AttemptRecord) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    quizzes: Arc<Mutex<HashMap<String, Quiz>>>,
    written: Arc<Mutex<HashMap<PathBuf, Quiz>>>,
    attempts: Arc<Mutex<Vec<AttemptRecord>>>,
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a quiz under its own name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store lock is poisoned.
    pub fn insert_quiz(&self, quiz: Quiz) -> Result<(), StorageError> {
        let mut guard = self.quizzes.lock().map_err(poisoned)?;
        guard.insert(quiz.name().to_owned(), quiz);
        Ok(())
    }

    /// The quiz last written to `target`, if any.
    #[must_use]
    pub fn written(&self, target: &Path) -> Option<Quiz> {
        self.written.lock().ok()?.get(target).cloned()
    }

    #[must_use]
    pub fn attempts(&self) -> Vec<AttemptRecord> {
        self.attempts
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuizSource for InMemoryRepository {
    async fn load_quiz(&self, name: &str) -> Result<Quiz, StorageError> {
        let guard = self.quizzes.lock().map_err(poisoned)?;
        guard.get(name).cloned().ok_or(StorageError::NotFound)
    }

    async fn quiz_names(&self) -> Result<Vec<String>, StorageError> {
        let guard = self.quizzes.lock().map_err(poisoned)?;
        let mut names: Vec<_> = guard.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl QuizSink for InMemoryRepository {
    async fn write_quiz(&self, target: &Path, quiz: &Quiz) -> Result<(), StorageError> {
        let mut guard = self.written.lock().map_err(poisoned)?;
        guard.insert(target.to_path_buf(), quiz.clone());
        Ok(())
    }
}

#[async_trait]
impl AttemptLog for InMemoryRepository {
    async fn append(&self, record: &AttemptRecord) -> Result<(), StorageError> {
        let mut guard = self.attempts.lock().map_err(poisoned)?;
        guard.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuizItem;
    use quiz_core::time::fixed_now;

    fn build_quiz(name: &str) -> Quiz {
        Quiz::new(name, None, None, false, vec![QuizItem::new("Q").unwrap()]).unwrap()
    }

    #[tokio::test]
    async fn loads_inserted_quizzes_by_name() {
        let repo = InMemoryRepository::new();
        repo.insert_quiz(build_quiz("movies")).unwrap();
        repo.insert_quiz(build_quiz("albums")).unwrap();

        assert_eq!(repo.load_quiz("movies").await.unwrap().name(), "movies");
        assert_eq!(repo.quiz_names().await.unwrap(), vec!["albums", "movies"]);
        assert!(matches!(
            repo.load_quiz("missing").await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn records_writes_and_attempts() {
        let repo = InMemoryRepository::new();
        let quiz = build_quiz("movies");
        repo.write_quiz(Path::new("out.json"), &quiz).await.unwrap();
        assert_eq!(repo.written(Path::new("out.json")), Some(quiz));

        let record = AttemptRecord {
            quiz: "movies".into(),
            position: 0,
            statement: "SELECT 1".into(),
            at: fixed_now(),
        };
        repo.append(&record).await.unwrap();
        assert_eq!(repo.attempts(), vec![record]);
    }
}
