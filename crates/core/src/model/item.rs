use thiserror::Error;

use crate::model::value::Row;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizItemError {
    #[error("quiz item prompt cannot be empty")]
    EmptyPrompt,

    #[error("expected statement cannot be empty")]
    EmptyStatement,
}

//
// ─── EXPECTATION ───────────────────────────────────────────────────────────────
//

/// What a submitted statement is scored against.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Expectation {
    /// Literal rows, in order.
    Rows(Vec<Row>),
    /// A statement whose rows become the expectation once executed.
    Statement(String),
    /// Informational item; nothing to score.
    #[default]
    None,
}

impl Expectation {
    /// Picks the scoring baseline from the fields a quiz file may carry.
    ///
    /// Literal rows win over `expected_statement`, which wins over `solution`.
    #[must_use]
    pub fn from_fields(
        expected_result: Option<Vec<Row>>,
        expected_statement: Option<&str>,
        solution: Option<&str>,
    ) -> Self {
        if let Some(rows) = expected_result {
            return Self::Rows(rows);
        }
        expected_statement
            .or(solution)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or(Self::None, |s| Self::Statement(s.to_owned()))
    }

    #[must_use]
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            Expectation::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_statement(&self) -> bool {
        matches!(self, Expectation::Statement(_))
    }
}

//
// ─── QUIZ ITEM ─────────────────────────────────────────────────────────────────
//

/// One question of a quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizItem {
    title: Option<String>,
    prompt: String,
    solution: Option<String>,
    expected_statement: Option<String>,
    expectation: Expectation,
}

impl QuizItem {
    /// Creates an item with just a prompt; use the `with_*` builders for the rest.
    ///
    /// # Errors
    ///
    /// Returns `QuizItemError::EmptyPrompt` if the prompt is blank.
    pub fn new(prompt: impl Into<String>) -> Result<Self, QuizItemError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuizItemError::EmptyPrompt);
        }
        Ok(Self {
            title: None,
            prompt,
            solution: None,
            expected_statement: None,
            expectation: Expectation::None,
        })
    }

    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_solution(mut self, solution: Option<String>) -> Self {
        self.solution = solution.filter(|s| !s.trim().is_empty());
        self
    }

    /// Sets the canonical statement for this item.
    ///
    /// # Errors
    ///
    /// Returns `QuizItemError::EmptyStatement` if the statement is blank.
    pub fn with_expected_statement(
        mut self,
        statement: Option<String>,
    ) -> Result<Self, QuizItemError> {
        if let Some(s) = &statement {
            if s.trim().is_empty() {
                return Err(QuizItemError::EmptyStatement);
            }
        }
        self.expected_statement = statement;
        Ok(self)
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: Expectation) -> Self {
        self.expectation = expectation;
        self
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref()
    }

    #[must_use]
    pub fn expected_statement(&self) -> Option<&str> {
        self.expected_statement.as_deref()
    }

    #[must_use]
    pub fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    /// Text revealed by `\solution`: the solution, else the expected statement.
    #[must_use]
    pub fn solution_text(&self) -> Option<&str> {
        self.solution().or(self.expected_statement())
    }

    /// Whether this item carries anything that gives the answer away.
    #[must_use]
    pub fn reveals_solution(&self) -> bool {
        self.solution.is_some()
            || self.expected_statement.is_some()
            || self.expectation.is_statement()
    }

    /// Copy of this item without solution text or statements.
    #[must_use]
    pub fn without_solution(&self) -> Self {
        Self {
            title: self.title.clone(),
            prompt: self.prompt.clone(),
            solution: None,
            expected_statement: None,
            expectation: self.expectation.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn new_rejects_blank_prompt() {
        assert_eq!(QuizItem::new("  \n").unwrap_err(), QuizItemError::EmptyPrompt);
    }

    #[test]
    fn expectation_prefers_literal_rows() {
        let rows = vec![vec![CellValue::Integer(7)]];
        let exp = Expectation::from_fields(Some(rows.clone()), Some("SELECT 7"), Some("SELECT 7"));
        assert_eq!(exp, Expectation::Rows(rows));
    }

    #[test]
    fn expectation_falls_back_to_solution() {
        let exp = Expectation::from_fields(None, None, Some("SELECT 1;"));
        assert_eq!(exp, Expectation::Statement("SELECT 1;".into()));
        assert_eq!(Expectation::from_fields(None, None, None), Expectation::None);
    }

    #[test]
    fn solution_text_falls_back_to_expected_statement() {
        let item = QuizItem::new("Q")
            .unwrap()
            .with_expected_statement(Some("SELECT 2".into()))
            .unwrap();
        assert_eq!(item.solution_text(), Some("SELECT 2"));

        let item = item.with_solution(Some("SELECT 2 -- explained".into()));
        assert_eq!(item.solution_text(), Some("SELECT 2 -- explained"));
    }

    #[test]
    fn without_solution_keeps_prompt_and_rows() {
        let rows = vec![vec![CellValue::from("x")]];
        let item = QuizItem::new("Q")
            .unwrap()
            .with_title(Some("T".into()))
            .with_solution(Some("SELECT 'x'".into()))
            .with_expectation(Expectation::Rows(rows.clone()));

        let closed = item.without_solution();
        assert_eq!(closed.prompt(), "Q");
        assert_eq!(closed.title(), Some("T"));
        assert_eq!(closed.solution(), None);
        assert_eq!(closed.expectation().rows(), Some(rows.as_slice()));
        assert!(!closed.reveals_solution());
    }
}
