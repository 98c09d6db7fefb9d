//! Routes parsed input lines to the quiz session or the database.
//!
//! Every error below this point becomes text for the user; the session keeps
//! whatever state it had.

use quiz_core::model::ResultSet;
use tracing::debug;

use crate::command::Command;
use crate::error::{QuizLoadError, QuizSessionError};
use crate::sessions::view;
use crate::sessions::{Advance, QuizLoopService, QuizSession};

/// What the shell should show after handling one line.
#[derive(Debug, PartialEq)]
pub enum Response {
    Nothing,
    Message(String),
    Rows {
        result: ResultSet,
        feedback: Option<String>,
    },
    Failed(String),
    Quit,
}

/// Owns the running session and the services behind it.
#[derive(Debug)]
pub struct QuizShell {
    service: QuizLoopService,
    session: QuizSession,
}

impl QuizShell {
    #[must_use]
    pub fn new(service: QuizLoopService, session: QuizSession) -> Self {
        Self { service, session }
    }

    /// Start the named quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizLoadError` if the session cannot be started.
    pub async fn start(service: QuizLoopService, name: &str) -> Result<Self, QuizLoadError> {
        let session = service.start_session(name).await?;
        Ok(Self::new(service, session))
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Welcome banner followed by the first question.
    #[must_use]
    pub fn greeting(&self) -> String {
        format!(
            "{}\n\n{}",
            view::welcome(self.session.quiz()),
            self.current_prompt()
        )
    }

    /// Input prompt reflecting progress, e.g. `movies[2/5]> `.
    #[must_use]
    pub fn input_prompt(&self) -> String {
        let progress = self.session.progress();
        let name = self.session.quiz().name();
        if progress.finished {
            format!("{name}[done]> ")
        } else {
            format!("{name}[{}/{}]> ", progress.question_number(), progress.total)
        }
    }

    fn current_prompt(&self) -> String {
        view::full_prompt(
            self.session.current_item(),
            self.session.position(),
            self.session.quiz().len(),
        )
    }

    /// Parse and handle one line of input.
    pub async fn handle_line(&mut self, line: &str) -> Response {
        match Command::parse(line) {
            Ok(Some(command)) => self.dispatch(command).await,
            Ok(None) => Response::Nothing,
            Err(e) => Response::Message(e.to_string()),
        }
    }

    pub async fn dispatch(&mut self, command: Command) -> Response {
        debug!(?command, position = self.session.position(), "dispatch");
        match command {
            Command::Question => match self.session.show_question().map(|_| ()) {
                Ok(()) => Response::Message(self.current_prompt()),
                Err(QuizSessionError::Finished) => {
                    Response::Message(self.session.completion_message())
                }
                Err(e) => Response::Message(e.to_string()),
            },
            Command::Solution => match self.session.show_solution().map(ToOwned::to_owned) {
                Ok(solution) => Response::Message(solution),
                Err(e) => Response::Message(e.to_string()),
            },
            Command::Next => {
                if matches!(self.session.advance(), Advance::Question(_)) {
                    Response::Message(self.current_prompt())
                } else {
                    Response::Message(self.session.completion_message())
                }
            }
            Command::ExportClosedQuiz(target) => {
                match self.service.export_closed(&self.session, &target).await {
                    Ok(_) => Response::Message(format!("Export successful: {}", target.display())),
                    Err(e) => Response::Failed(e.to_string()),
                }
            }
            Command::Help => Response::Message(view::help_text().to_owned()),
            Command::Quit => Response::Quit,
            Command::Raw(sql) => self.run_statement(&sql).await,
        }
    }

    async fn run_statement(&mut self, sql: &str) -> Response {
        match self.service.submit_statement(&mut self.session, sql).await {
            Ok(report) => {
                let feedback = match report.scoring {
                    Ok(verdict) => Some(view::verdict_feedback(verdict)),
                    Err(QuizSessionError::NotScorable | QuizSessionError::Finished) => None,
                    Err(e) => Some(e.to_string()),
                };
                Response::Rows {
                    result: report.result,
                    feedback,
                }
            }
            Err(e) => Response::Failed(e.to_string()),
        }
    }
}
