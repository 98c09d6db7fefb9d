use quiz_core::model::{CellValue, Row};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use crate::repository::ExecutionError;

fn decode<E: core::fmt::Display>(e: E) -> ExecutionError {
    ExecutionError::new(format!("cannot decode value: {e}"))
}

/// Column names of a row, in order.
pub(crate) fn column_names(row: &SqliteRow) -> Vec<String> {
    row.columns()
        .iter()
        .map(|c| c.name().to_owned())
        .collect()
}

/// Decodes one cell by the storage class of the value actually stored.
///
/// Declared column types are ignored; SQLite lets any column hold any class.
pub(crate) fn cell_at(row: &SqliteRow, index: usize) -> Result<CellValue, ExecutionError> {
    let raw = row.try_get_raw(index).map_err(decode)?;
    if raw.is_null() {
        return Ok(CellValue::Null);
    }
    let class = raw.type_info().name().to_ascii_uppercase();

    let cell = match class.as_str() {
        "INTEGER" | "BOOLEAN" => CellValue::Integer(row.try_get_unchecked(index).map_err(decode)?),
        "REAL" | "NUMERIC" => CellValue::Real(row.try_get_unchecked(index).map_err(decode)?),
        "BLOB" => CellValue::Blob(row.try_get_unchecked(index).map_err(decode)?),
        _ => CellValue::Text(row.try_get_unchecked(index).map_err(decode)?),
    };
    Ok(cell)
}

pub(crate) fn map_row(row: &SqliteRow) -> Result<Row, ExecutionError> {
    (0..row.len()).map(|i| cell_at(row, i)).collect()
}
