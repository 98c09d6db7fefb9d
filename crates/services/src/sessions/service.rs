use std::fmt;
use std::path::Path;
use std::sync::Arc;

use quiz_core::model::{Quiz, QuizItem, ResultSet};
use quiz_core::{Verdict, evaluate};
use storage::{ExecutionError, QuizSink};
use tracing::info;

use super::progress::SessionProgress;
use crate::error::{ExportError, QuizSessionError};

//
// ─── STATES ────────────────────────────────────────────────────────────────────
//

/// What the session last showed the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Question,
    Solution,
    ResultFeedback,
}

/// Externally visible state, with `Finished` as the terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Question,
    Solution,
    ResultFeedback,
    Finished,
}

/// Result of `QuizSession::advance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance<'a> {
    /// Moved on; this is the new current item.
    Question(&'a QuizItem),
    /// There was nothing left; the session is finished.
    Completed,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One pass through a quiz.
///
/// Steps through the items in order. The quiz itself is shared and never
/// modified; the session owns only its position and display state.
pub struct QuizSession {
    quiz: Arc<Quiz>,
    position: usize,
    display_mode: DisplayMode,
    finished: bool,
    last_verdict: Option<Verdict>,
    solved: Vec<bool>,
}

impl QuizSession {
    /// Start at the first item, showing the question.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Empty` if the quiz has no items.
    pub fn new(quiz: Arc<Quiz>) -> Result<Self, QuizSessionError> {
        if quiz.is_empty() {
            return Err(QuizSessionError::Empty);
        }
        let solved = vec![false; quiz.len()];
        Ok(Self {
            quiz,
            position: 0,
            display_mode: DisplayMode::Question,
            finished: false,
            last_verdict: None,
            solved,
        })
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.finished {
            return SessionState::Finished;
        }
        match self.display_mode {
            DisplayMode::Question => SessionState::Question,
            DisplayMode::Solution => SessionState::Solution,
            DisplayMode::ResultFeedback => SessionState::ResultFeedback,
        }
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            position: self.position,
            total: self.quiz.len(),
            solved: self.solved.iter().filter(|s| **s).count(),
            finished: self.finished,
        }
    }

    /// The item at the current position.
    #[must_use]
    pub fn current_item(&self) -> &QuizItem {
        // position < len is upheld by new() and advance()
        &self.quiz.items()[self.position]
    }

    /// Show the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Finished` once the quiz is over.
    pub fn show_question(&mut self) -> Result<&QuizItem, QuizSessionError> {
        self.ensure_running()?;
        self.display_mode = DisplayMode::Question;
        Ok(self.current_item())
    }

    /// Reveal the solution to the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::NoSolutionAvailable` if the item has none
    /// (state unchanged), or `QuizSessionError::Finished` once the quiz is over.
    pub fn show_solution(&mut self) -> Result<&str, QuizSessionError> {
        self.ensure_running()?;
        if self.current_item().solution_text().is_none() {
            return Err(QuizSessionError::NoSolutionAvailable);
        }
        self.display_mode = DisplayMode::Solution;
        self.current_item()
            .solution_text()
            .ok_or(QuizSessionError::NoSolutionAvailable)
    }

    /// Score the outcome of a submitted statement against the current item.
    ///
    /// A failed statement is not a wrong answer: it is reported back as
    /// `QuizSessionError::Execution` and nothing changes.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Execution` for a failed statement,
    /// `QuizSessionError::Finished` once the quiz is over, and
    /// `QuizSessionError::NotScorable` if the item has no expected rows. The
    /// session is unchanged in every error case.
    pub fn submit(
        &mut self,
        result: Result<&ResultSet, &ExecutionError>,
    ) -> Result<Verdict, QuizSessionError> {
        let actual = result.map_err(|e| QuizSessionError::Execution(e.clone()))?;
        self.ensure_running()?;
        let expected = self
            .current_item()
            .expectation()
            .rows()
            .ok_or(QuizSessionError::NotScorable)?;

        let verdict = evaluate(&actual.rows, expected);
        self.display_mode = DisplayMode::ResultFeedback;
        self.last_verdict = Some(verdict);
        if verdict.is_correct() {
            self.solved[self.position] = true;
        }
        Ok(verdict)
    }

    /// Move to the next question, or finish after the last one.
    ///
    /// Once finished, further calls keep returning `Advance::Completed`.
    pub fn advance(&mut self) -> Advance<'_> {
        if self.finished {
            return Advance::Completed;
        }
        if self.position + 1 < self.quiz.len() {
            self.position += 1;
            self.display_mode = DisplayMode::Question;
            self.last_verdict = None;
            return Advance::Question(self.current_item());
        }

        self.finished = true;
        info!(
            quiz = self.quiz.name(),
            solved = self.progress().solved,
            total = self.quiz.len(),
            "quiz finished"
        );
        Advance::Completed
    }

    /// Message shown once the quiz is over.
    #[must_use]
    pub fn completion_message(&self) -> String {
        let progress = self.progress();
        format!(
            "All done! Congrats! You solved {} of {} questions.",
            progress.solved, progress.total
        )
    }

    /// Write a closed copy of the whole quiz to `target`.
    ///
    /// Solutions and expected statements are dropped; prompts, order and
    /// expected rows are kept. The session itself is not touched.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Export` if the quiz cannot be closed or the
    /// target cannot be written.
    pub async fn export_closed(
        &self,
        target: &Path,
        sink: &dyn QuizSink,
    ) -> Result<Quiz, QuizSessionError> {
        let closed = self.quiz.to_closed().map_err(ExportError::from)?;
        sink.write_quiz(target, &closed)
            .await
            .map_err(ExportError::from)?;
        info!(quiz = closed.name(), target = %target.display(), "exported closed quiz");
        Ok(closed)
    }

    fn ensure_running(&self) -> Result<(), QuizSessionError> {
        if self.finished {
            Err(QuizSessionError::Finished)
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("quiz", &self.quiz.name())
            .field("items_len", &self.quiz.len())
            .field("position", &self.position)
            .field("display_mode", &self.display_mode)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
