//! Scoring of a submitted result set against the expected rows.
//!
//! Comparison is positional and exact: same row count, and each row at the
//! same ordinal holds equal values in the same column order. Column names are
//! ignored, rows are never reordered, and text is never trimmed.

use crate::model::Row;

/// Outcome of scoring one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Compares `actual` rows with `expected` rows.
#[must_use]
pub fn evaluate(actual: &[Row], expected: &[Row]) -> Verdict {
    if actual == expected {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn rows(values: &[&[i64]]) -> Vec<Row> {
        values
            .iter()
            .map(|r| r.iter().copied().map(CellValue::Integer).collect())
            .collect()
    }

    #[test]
    fn identical_rows_are_correct() {
        let expected = rows(&[&[1, 2], &[3, 4]]);
        assert_eq!(evaluate(&rows(&[&[1, 2], &[3, 4]]), &expected), Verdict::Correct);
    }

    #[test]
    fn reordered_rows_are_incorrect() {
        let expected = rows(&[&[1, 2], &[3, 4]]);
        assert_eq!(evaluate(&rows(&[&[3, 4], &[1, 2]]), &expected), Verdict::Incorrect);
    }

    #[test]
    fn reordered_columns_are_incorrect() {
        assert_eq!(evaluate(&rows(&[&[2, 1]]), &rows(&[&[1, 2]])), Verdict::Incorrect);
    }

    #[test]
    fn extra_row_is_incorrect() {
        assert_eq!(evaluate(&rows(&[&[1], &[1]]), &rows(&[&[1]])), Verdict::Incorrect);
    }

    #[test]
    fn both_empty_is_correct() {
        assert_eq!(evaluate(&[], &[]), Verdict::Correct);
        assert_eq!(evaluate(&[], &rows(&[&[1]])), Verdict::Incorrect);
    }

    #[test]
    fn whitespace_is_significant() {
        let actual = vec![vec![CellValue::from("Jaws ")]];
        let expected = vec![vec![CellValue::from("Jaws")]];
        assert_eq!(evaluate(&actual, &expected), Verdict::Incorrect);
    }
}
