//! Classification of one input line.
//!
//! Lines starting with `\` are quiz control commands; the first token picks
//! the command and anything else prefixed is rejected. Every other line is
//! forwarded to the database untouched.

use std::path::PathBuf;

use thiserror::Error;

const MARKER: char = '\\';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Question,
    Solution,
    Next,
    ExportClosedQuiz(PathBuf),
    Help,
    Quit,
    /// A statement for the database, exactly as typed.
    Raw(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandError {
    #[error("unknown command: {0} (try \\help)")]
    Unknown(String),
    #[error("usage: {0} <path>")]
    MissingArgument(&'static str),
}

impl Command {
    /// Parse one line. Blank lines yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Unknown` for an unrecognised `\` token and
    /// `CommandError::MissingArgument` when a command lacks its argument.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if !trimmed.starts_with(MARKER) {
            return Ok(Some(Self::Raw(line.trim_end_matches(['\n', '\r']).to_owned())));
        }

        let (token, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(t, r)| (t, r.trim()));

        let command = match token {
            "\\question" => Self::Question,
            "\\solution" => Self::Solution,
            "\\next" => Self::Next,
            "\\export_closed_quiz" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("\\export_closed_quiz"));
                }
                Self::ExportClosedQuiz(PathBuf::from(rest))
            }
            "\\help" | "\\?" => Self::Help,
            "\\q" | "\\quit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(Some(command))
    }
}
