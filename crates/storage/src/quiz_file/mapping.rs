use quiz_core::model::{Expectation, Quiz, QuizItem, Row};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

/// On-disk shape of one quiz in a quiz document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct QuizRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub setup: Vec<String>,
    pub items: Vec<ItemRecord>,
}

/// On-disk shape of one quiz item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_statement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_result: Option<Vec<Row>>,
}

fn invalid<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Invalid(e.to_string())
}

pub(crate) fn item_from_record(index: usize, record: ItemRecord) -> Result<QuizItem, StorageError> {
    let expectation = Expectation::from_fields(
        record.expected_result,
        record.expected_statement.as_deref(),
        record.solution.as_deref(),
    );

    QuizItem::new(record.prompt)
        .and_then(|item| item.with_expected_statement(record.expected_statement))
        .map(|item| {
            item.with_title(record.title)
                .with_solution(record.solution)
                .with_expectation(expectation)
        })
        .map_err(|e| StorageError::Invalid(format!("item {index}: {e}")))
}

pub(crate) fn quiz_from_record(name: &str, record: QuizRecord) -> Result<Quiz, StorageError> {
    let items = record
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| item_from_record(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Quiz::new(
        name,
        record.title,
        record.description,
        record.closed,
        items,
    )
    .map_err(invalid)?
    .with_setup(record.setup))
}

pub(crate) fn record_from_quiz(quiz: &Quiz) -> QuizRecord {
    let items = quiz
        .items()
        .iter()
        .map(|item| ItemRecord {
            title: item.title().map(ToOwned::to_owned),
            prompt: item.prompt().to_owned(),
            solution: item.solution().map(ToOwned::to_owned),
            expected_statement: item.expected_statement().map(ToOwned::to_owned),
            expected_result: item.expectation().rows().map(<[Row]>::to_vec),
        })
        .collect();

    // A title equal to the name is the default and need not be written.
    let title = (quiz.title() != quiz.name()).then(|| quiz.title().to_owned());

    QuizRecord {
        title,
        description: quiz.description().map(ToOwned::to_owned),
        closed: quiz.is_closed(),
        setup: quiz.setup().to_vec(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::CellValue;

    fn item(prompt: &str) -> ItemRecord {
        ItemRecord {
            title: None,
            prompt: prompt.into(),
            solution: None,
            expected_statement: None,
            expected_result: None,
        }
    }

    #[test]
    fn blank_prompt_is_reported_with_index() {
        let record = QuizRecord {
            title: None,
            description: None,
            closed: false,
            setup: Vec::new(),
            items: vec![item("ok"), item("  ")],
        };
        let err = quiz_from_record("movies", record).unwrap_err();
        assert!(matches!(err, StorageError::Invalid(msg) if msg.starts_with("item 1")));
    }

    #[test]
    fn solution_becomes_statement_expectation() {
        let mut rec = item("Count films");
        rec.solution = Some("SELECT count(*) FROM movies".into());
        let quiz_item = item_from_record(0, rec).unwrap();
        assert_eq!(
            quiz_item.expectation(),
            &Expectation::Statement("SELECT count(*) FROM movies".into())
        );
    }

    #[test]
    fn record_keeps_resolved_rows() {
        let quiz = Quiz::new(
            "movies",
            None,
            None,
            true,
            vec![
                QuizItem::new("Pick a number")
                    .unwrap()
                    .with_expectation(Expectation::Rows(vec![vec![CellValue::Integer(7)]])),
            ],
        )
        .unwrap();

        let record = record_from_quiz(&quiz);
        assert!(record.closed);
        assert!(record.title.is_none());
        assert_eq!(
            record.items[0].expected_result,
            Some(vec![vec![CellValue::Integer(7)]])
        );
        assert!(record.items[0].solution.is_none());
    }
}
