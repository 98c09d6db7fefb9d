//! Terminal rendering of query results.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, ContentArrangement, Table};
use quiz_core::model::ResultSet;

/// Render rows as a table followed by a row count.
///
/// Statements that return no columns (DDL, inserts) render as `OK`.
pub fn result_table(result: &ResultSet) -> String {
    if result.columns.is_empty() && result.is_empty() {
        return "OK".to_owned();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if !result.columns.is_empty() {
        table.set_header(result.columns.iter().map(Cell::new));
    }
    for row in &result.rows {
        table.add_row(row.iter().map(|cell| Cell::new(cell.to_string())));
    }

    let count = result.row_count();
    format!(
        "{table}\n({count} row{})",
        if count == 1 { "" } else { "s" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::CellValue;

    #[test]
    fn statements_without_columns_render_ok() {
        assert_eq!(result_table(&ResultSet::default()), "OK");
    }

    #[test]
    fn rows_render_with_header_and_count() {
        let result = ResultSet::new(
            vec!["id".into(), "title".into()],
            vec![
                vec![CellValue::Integer(1), CellValue::from("Alien")],
                vec![CellValue::Integer(2), CellValue::Null],
            ],
        );
        let text = result_table(&result);
        assert!(text.contains("title"));
        assert!(text.contains("Alien"));
        assert!(text.contains("NULL"));
        assert!(text.ends_with("(2 rows)"));
    }

    #[test]
    fn empty_select_still_shows_header() {
        let result = ResultSet::new(vec!["id".into()], Vec::new());
        let text = result_table(&result);
        assert!(text.contains("id"));
        assert!(text.ends_with("(0 rows)"));
    }
}
