use std::path::Path;
use std::sync::Arc;

use quiz_core::Verdict;
use quiz_core::model::{Expectation, Quiz, ResultSet};
use storage::{
    AttemptLog, AttemptRecord, ExecutionError, QuizSink, QuizSource, StatementExecutor,
    StorageError,
};
use tracing::{debug, info, warn};

use super::service::QuizSession;
use crate::Clock;
use crate::error::{QuizLoadError, QuizSessionError};

/// Rows from a forwarded statement and how they scored.
#[derive(Debug)]
pub struct StatementReport {
    pub result: ResultSet,
    pub scoring: Result<Verdict, QuizSessionError>,
}

/// Orchestrates session start, statement submission and export.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    quizzes: Arc<dyn QuizSource>,
    exports: Arc<dyn QuizSink>,
    executor: Arc<dyn StatementExecutor>,
    attempts: Option<Arc<dyn AttemptLog>>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        quizzes: Arc<dyn QuizSource>,
        exports: Arc<dyn QuizSink>,
        executor: Arc<dyn StatementExecutor>,
    ) -> Self {
        Self {
            clock,
            quizzes,
            exports,
            executor,
            attempts: None,
        }
    }

    #[must_use]
    pub fn with_attempt_log(mut self, attempts: Option<Arc<dyn AttemptLog>>) -> Self {
        self.attempts = attempts;
        self
    }

    /// Load the named quiz, prepare the database, and start a session.
    ///
    /// Setup statements run first, in order. Then every item whose expectation
    /// is a statement has that statement executed once and its rows stored as
    /// the expected result.
    ///
    /// # Errors
    ///
    /// Returns `QuizLoadError` if the quiz cannot be loaded or any setup or
    /// expected statement fails.
    pub async fn start_session(&self, name: &str) -> Result<QuizSession, QuizLoadError> {
        let quiz = match self.quizzes.load_quiz(name).await {
            Ok(quiz) => quiz,
            Err(StorageError::NotFound) => {
                return Err(QuizLoadError::NotFound {
                    name: name.to_owned(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        for (index, statement) in quiz.setup().iter().enumerate() {
            self.executor
                .execute(statement)
                .await
                .map_err(|source| QuizLoadError::Setup { index, source })?;
        }

        let quiz = self.resolve_expectations(quiz).await?;
        let session = QuizSession::new(Arc::new(quiz))?;
        info!(quiz = name, items = session.quiz().len(), "quiz session started");
        Ok(session)
    }

    async fn resolve_expectations(&self, mut quiz: Quiz) -> Result<Quiz, QuizLoadError> {
        let pending: Vec<(usize, String)> = quiz
            .items()
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match item.expectation() {
                Expectation::Statement(sql) => Some((index, sql.clone())),
                _ => None,
            })
            .collect();

        for (index, sql) in pending {
            let result = self
                .executor
                .execute(&sql)
                .await
                .map_err(|source| QuizLoadError::Expectation { index, source })?;
            debug!(index, rows = result.row_count(), "resolved expected rows");
            quiz.set_expectation(index, Expectation::Rows(result.rows))?;
        }
        Ok(quiz)
    }

    /// Run a statement typed by the user and score it against the current item.
    ///
    /// Correct answers are appended to the attempt log when one is configured;
    /// a failing log write is reported in the logs only.
    ///
    /// # Errors
    ///
    /// Returns the `ExecutionError` when the database rejects the statement.
    /// The session is left as it was.
    pub async fn submit_statement(
        &self,
        session: &mut QuizSession,
        sql: &str,
    ) -> Result<StatementReport, ExecutionError> {
        let executed = self.executor.execute(sql).await;
        let scoring = session.submit(executed.as_ref());
        let result = executed?;

        if matches!(scoring, Ok(Verdict::Correct)) {
            self.record_attempt(session, sql).await;
        }
        Ok(StatementReport { result, scoring })
    }

    async fn record_attempt(&self, session: &QuizSession, sql: &str) {
        let Some(log) = &self.attempts else {
            return;
        };
        let record = AttemptRecord {
            quiz: session.quiz().name().to_owned(),
            position: session.position(),
            statement: sql.to_owned(),
            at: self.clock.now(),
        };
        if let Err(e) = log.append(&record).await {
            warn!(error = %e, "could not record attempt");
        }
    }

    /// Write the closed form of the session's quiz to `target`.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Export` if the quiz cannot be closed or written.
    pub async fn export_closed(
        &self,
        session: &QuizSession,
        target: &Path,
    ) -> Result<Quiz, QuizSessionError> {
        session.export_closed(target, self.exports.as_ref()).await
    }
}

impl std::fmt::Debug for QuizLoopService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizLoopService")
            .field("clock", &self.clock)
            .field("attempt_log", &self.attempts.is_some())
            .finish_non_exhaustive()
    }
}
