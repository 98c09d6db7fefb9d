use std::fmt;

use serde::{Deserialize, Serialize};

//
// ─── CELL VALUE ────────────────────────────────────────────────────────────────
//

/// A single value in a result row.
///
/// Quiz files spell cells as plain JSON scalars (`null`, integers, floats,
/// strings). Blobs only ever come back from the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => f.write_str("NULL"),
            CellValue::Integer(v) => write!(f, "{v}"),
            // keep the fraction so 2.0 never reads like INTEGER 2
            CellValue::Real(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            CellValue::Real(v) => write!(f, "{v}"),
            CellValue::Text(v) => f.write_str(v),
            CellValue::Blob(bytes) => {
                f.write_str("x'")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                f.write_str("'")
            }
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One row of a result set, in column order.
pub type Row = Vec<CellValue>;

/// Renders a row as `a | b | c`.
#[must_use]
pub fn format_row(row: &[CellValue]) -> String {
    row.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

//
// ─── RESULT SET ────────────────────────────────────────────────────────────────
//

/// Rows returned by a statement, plus the column names for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_parse_from_json_scalars() {
        let row: Row = serde_json::from_str(r#"[null, 7, 2.5, "Alien"]"#).unwrap();
        assert_eq!(
            row,
            vec![
                CellValue::Null,
                CellValue::Integer(7),
                CellValue::Real(2.5),
                CellValue::Text("Alien".into()),
            ]
        );
    }

    #[test]
    fn integer_and_real_are_distinct() {
        assert_ne!(CellValue::Integer(7), CellValue::Real(7.0));
    }

    #[test]
    fn display_formats_each_kind() {
        assert_eq!(CellValue::Null.to_string(), "NULL");
        assert_eq!(CellValue::Real(2.0).to_string(), "2.0");
        assert_eq!(CellValue::Real(-3.0).to_string(), "-3.0");
        assert_eq!(CellValue::Real(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Integer(2).to_string(), "2");
        assert_eq!(CellValue::Blob(vec![0xde, 0xad]).to_string(), "x'dead'");
        assert_eq!(
            format_row(&[CellValue::from("Jaws"), CellValue::from(1975_i64)]),
            "Jaws | 1975"
        );
    }
}
