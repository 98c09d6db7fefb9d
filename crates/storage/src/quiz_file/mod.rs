//! JSON quiz documents.
//!
//! A document is an object keyed by quiz name:
//!
//! ```json
//! {
//!   "movies": {
//!     "title": "Movies",
//!     "description": "Practice SELECT",
//!     "setup": ["CREATE TABLE movies (title TEXT, year INTEGER)"],
//!     "items": [
//!       { "prompt": "Pick a number", "expected_result": [[7]] },
//!       { "prompt": "Count the movies", "solution": "SELECT count(*) FROM movies" }
//!     ]
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::model::Quiz;
use tracing::debug;

use crate::repository::{QuizSink, QuizSource, StorageError};

mod mapping;

use mapping::{QuizRecord, quiz_from_record, record_from_quiz};

type QuizDocument = BTreeMap<String, QuizRecord>;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// A quiz document on disk.
///
/// Reads quizzes from `path`; writes go to whatever target they are given.
#[derive(Debug, Clone)]
pub struct JsonQuizFile {
    path: PathBuf,
}

impl JsonQuizFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<QuizDocument, StorageError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&raw).map_err(ser)
    }
}

#[async_trait]
impl QuizSource for JsonQuizFile {
    async fn load_quiz(&self, name: &str) -> Result<Quiz, StorageError> {
        let mut document = self.read_document().await?;
        let record = document.remove(name).ok_or(StorageError::NotFound)?;
        debug!(path = %self.path.display(), quiz = name, items = record.items.len(), "loaded quiz");
        quiz_from_record(name, record)
    }

    async fn quiz_names(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.read_document().await?.into_keys().collect())
    }
}

#[async_trait]
impl QuizSink for JsonQuizFile {
    async fn write_quiz(&self, target: &Path, quiz: &Quiz) -> Result<(), StorageError> {
        let mut document = QuizDocument::new();
        document.insert(quiz.name().to_owned(), record_from_quiz(quiz));
        let mut body = serde_json::to_string_pretty(&document).map_err(ser)?;
        body.push('\n');
        tokio::fs::write(target, body).await?;
        debug!(target = %target.display(), quiz = quiz.name(), "wrote quiz");
        Ok(())
    }
}
