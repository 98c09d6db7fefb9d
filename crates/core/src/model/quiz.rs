use thiserror::Error;

use crate::model::item::{Expectation, QuizItem};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz name cannot be empty")]
    EmptyName,

    #[error("quiz has no items")]
    NoItems,

    #[error("closed quiz item {index} still carries a solution")]
    SolutionInClosedQuiz { index: usize },

    #[error("item {index} expectation has not been resolved to rows")]
    UnresolvedExpectation { index: usize },

    #[error("item index {index} out of range")]
    ItemOutOfRange { index: usize },
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// A named, ordered list of quiz items.
///
/// Item order defines progression. A quiz always has at least one item.
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    name: String,
    title: String,
    description: Option<String>,
    closed: bool,
    setup: Vec<String>,
    items: Vec<QuizItem>,
}

impl Quiz {
    /// Creates a quiz. `title` defaults to `name` when absent.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyName` for a blank name, `QuizError::NoItems`
    /// for an empty item list, or `QuizError::SolutionInClosedQuiz` when a
    /// closed quiz still has solution fields.
    pub fn new(
        name: impl Into<String>,
        title: Option<String>,
        description: Option<String>,
        closed: bool,
        items: Vec<QuizItem>,
    ) -> Result<Self, QuizError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(QuizError::EmptyName);
        }
        if items.is_empty() {
            return Err(QuizError::NoItems);
        }
        if closed {
            if let Some(index) = items.iter().position(QuizItem::reveals_solution) {
                return Err(QuizError::SolutionInClosedQuiz { index });
            }
        }

        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| name.clone());

        Ok(Self {
            name,
            title,
            description: description.filter(|d| !d.trim().is_empty()),
            closed,
            setup: Vec::new(),
            items,
        })
    }

    /// Statements run against the database before the quiz starts.
    #[must_use]
    pub fn with_setup(mut self, setup: Vec<String>) -> Self {
        self.setup = setup
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn setup(&self) -> &[String] {
        &self.setup
    }

    #[must_use]
    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, index: usize) -> Option<&QuizItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True once no item is waiting for its expected statement to run.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.items.iter().any(|i| i.expectation().is_statement())
    }

    /// Replaces the expectation of one item, typically with the rows its
    /// expected statement produced.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::ItemOutOfRange` if `index` is past the last item.
    pub fn set_expectation(
        &mut self,
        index: usize,
        expectation: Expectation,
    ) -> Result<(), QuizError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(QuizError::ItemOutOfRange { index })?;
        *item = item.clone().with_expectation(expectation);
        Ok(())
    }

    /// Builds the closed form of this quiz: same prompts, order and expected
    /// rows, with every solution and expected statement removed.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnresolvedExpectation` if an item's expectation is
    /// still a statement, since writing it out would leak the answer.
    pub fn to_closed(&self) -> Result<Quiz, QuizError> {
        if let Some(index) = self
            .items
            .iter()
            .position(|i| i.expectation().is_statement())
        {
            return Err(QuizError::UnresolvedExpectation { index });
        }

        Ok(Quiz {
            name: self.name.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            closed: true,
            setup: self.setup.clone(),
            items: self.items.iter().map(QuizItem::without_solution).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn item(prompt: &str) -> QuizItem {
        QuizItem::new(prompt).unwrap()
    }

    fn open_item(prompt: &str, solution: &str, rows: Vec<Vec<CellValue>>) -> QuizItem {
        item(prompt)
            .with_solution(Some(solution.to_owned()))
            .with_expected_statement(Some(solution.to_owned()))
            .unwrap()
            .with_expectation(Expectation::Rows(rows))
    }

    #[test]
    fn new_rejects_empty_name_and_items() {
        assert_eq!(
            Quiz::new("  ", None, None, false, vec![item("Q")]).unwrap_err(),
            QuizError::EmptyName
        );
        assert_eq!(
            Quiz::new("movies", None, None, false, Vec::new()).unwrap_err(),
            QuizError::NoItems
        );
    }

    #[test]
    fn title_defaults_to_name() {
        let quiz = Quiz::new("movies", None, None, false, vec![item("Q")]).unwrap();
        assert_eq!(quiz.title(), "movies");
    }

    #[test]
    fn closed_quiz_rejects_solutions() {
        let items = vec![item("a"), item("b").with_solution(Some("SELECT 1".into()))];
        assert_eq!(
            Quiz::new("q", None, None, true, items).unwrap_err(),
            QuizError::SolutionInClosedQuiz { index: 1 }
        );
    }

    #[test]
    fn to_closed_strips_solutions_and_keeps_order() {
        let quiz = Quiz::new(
            "movies",
            Some("Movies".into()),
            Some("Practice joins".into()),
            false,
            vec![
                open_item("First", "SELECT 1", vec![vec![CellValue::Integer(1)]]),
                item("Read the schema"),
                open_item("Third", "SELECT 'x'", vec![vec![CellValue::from("x")]]),
            ],
        )
        .unwrap()
        .with_setup(vec!["CREATE TABLE t (x)".into()]);

        let closed = quiz.to_closed().unwrap();

        assert!(closed.is_closed());
        assert_eq!(closed.len(), 3);
        assert_eq!(closed.setup(), quiz.setup());
        for (open, shut) in quiz.items().iter().zip(closed.items()) {
            assert_eq!(open.prompt(), shut.prompt());
            assert_eq!(open.expectation(), shut.expectation());
            assert!(shut.solution().is_none());
            assert!(shut.expected_statement().is_none());
        }
        // source untouched
        assert!(!quiz.is_closed());
        assert_eq!(quiz.items()[0].solution(), Some("SELECT 1"));
    }

    #[test]
    fn to_closed_refuses_unresolved_statements() {
        let quiz = Quiz::new(
            "q",
            None,
            None,
            false,
            vec![item("Q").with_expectation(Expectation::Statement("SELECT 1".into()))],
        )
        .unwrap();
        assert!(!quiz.is_resolved());
        assert_eq!(
            quiz.to_closed().unwrap_err(),
            QuizError::UnresolvedExpectation { index: 0 }
        );
    }

    #[test]
    fn set_expectation_resolves_statement() {
        let mut quiz = Quiz::new(
            "q",
            None,
            None,
            false,
            vec![item("Q").with_expectation(Expectation::Statement("SELECT 1".into()))],
        )
        .unwrap();
        quiz.set_expectation(0, Expectation::Rows(vec![vec![CellValue::Integer(1)]]))
            .unwrap();
        assert!(quiz.is_resolved());
        assert_eq!(
            quiz.set_expectation(3, Expectation::None).unwrap_err(),
            QuizError::ItemOutOfRange { index: 3 }
        );
    }
}
