//! Text the shell shows for quiz events.

use std::fmt::Write as _;

use quiz_core::Verdict;
use quiz_core::model::{Quiz, QuizItem, format_row};

/// Banner shown once when the quiz starts.
#[must_use]
pub fn welcome(quiz: &Quiz) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", quiz.title());
    if let Some(description) = quiz.description() {
        let _ = writeln!(out, "\n{description}");
    }
    let _ = write!(
        out,
        "\n{} question{}. Type \\help for commands.",
        quiz.len(),
        if quiz.len() == 1 { "" } else { "s" }
    );
    out
}

/// The question as shown by `\question` and `\next`.
///
/// Includes the rows the answer should return when they are known.
#[must_use]
pub fn full_prompt(item: &QuizItem, position: usize, total: usize) -> String {
    let heading = item
        .title()
        .map_or_else(|| format!("Question {}/{total}", position + 1), ToOwned::to_owned);

    let mut out = format!("{heading}\n\n{}\n", item.prompt().trim_end());
    if let Some(rows) = item.expectation().rows() {
        out.push_str("\nThis should return:\n\n");
        if rows.is_empty() {
            out.push_str("    (no rows)\n");
        }
        for row in rows {
            let _ = writeln!(out, "    {}", format_row(row));
        }
    }
    out
}

/// Feedback after a scored statement.
#[must_use]
pub fn verdict_feedback(verdict: Verdict) -> String {
    match verdict {
        Verdict::Correct => "Correct! Continue to the next question with \\next".to_owned(),
        Verdict::Incorrect => {
            "Not quite. Check the expected rows with \\question and try again.".to_owned()
        }
    }
}

#[must_use]
pub fn help_text() -> &'static str {
    "\
\\question                   show the current question
\\solution                   show the solution to the current question
\\next                       move to the next question
\\export_closed_quiz <path>  write this quiz without solutions to <path>
\\help, \\?                   show this help
\\q, \\quit                   leave

Anything else is run against the database and checked against the expected rows."
}
