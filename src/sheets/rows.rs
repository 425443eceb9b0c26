//! Columnar-to-row transposition of a value grid.

use serde_json::{Map, Value};

/// One data row keyed by header name, in header order.
pub type RowRecord = Map<String, Value>;

/// Turns a grid whose first row is the header into one record per data row.
///
/// A row shorter than the header simply lacks the trailing fields; cells
/// beyond the header's width are dropped. An empty grid, or a header with no
/// data rows, yields no records.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sheetcache::sheets::rows_from_grid;
///
/// let rows = rows_from_grid(vec![
///     vec![json!("Name"), json!("Age")],
///     vec![json!("Alice"), json!("30")],
/// ]);
/// assert_eq!(serde_json::to_string(&rows).unwrap(), r#"[{"Name":"Alice","Age":"30"}]"#);
/// ```
pub fn rows_from_grid(grid: Vec<Vec<Value>>) -> Vec<RowRecord> {
    let mut grid = grid.into_iter();
    let Some(header) = grid.next() else {
        return Vec::new();
    };
    let fields: Vec<String> = header.iter().map(field_name).collect();

    grid.map(|row| fields.iter().cloned().zip(row).collect())
        .collect()
}

// Header cells are normally strings; anything else is keyed by its JSON text.
fn field_name(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grid(value: Value) -> Vec<Vec<Value>> {
        serde_json::from_value(value).unwrap()
    }

    fn render(rows: &[RowRecord]) -> String {
        serde_json::to_string(rows).unwrap()
    }

    #[test]
    fn header_keys_each_row() {
        let rows = rows_from_grid(grid(json!([
            ["Name", "Age"],
            ["Alice", "30"],
            ["Bob", "25"]
        ])));
        assert_eq!(
            render(&rows),
            r#"[{"Name":"Alice","Age":"30"},{"Name":"Bob","Age":"25"}]"#
        );
    }

    #[test]
    fn header_only_yields_nothing() {
        assert!(rows_from_grid(grid(json!([["Name", "Age"]]))).is_empty());
    }

    #[test]
    fn empty_grid_yields_nothing() {
        assert!(rows_from_grid(Vec::new()).is_empty());
    }

    #[test]
    fn short_row_omits_trailing_fields() {
        let rows = rows_from_grid(grid(json!([["Name", "Age", "City"], ["Alice"]])));
        assert_eq!(render(&rows), r#"[{"Name":"Alice"}]"#);
    }

    #[test]
    fn long_row_drops_extra_cells() {
        let rows = rows_from_grid(grid(json!([["Name"], ["Alice", "30", "Rome"]])));
        assert_eq!(render(&rows), r#"[{"Name":"Alice"}]"#);
    }

    #[test]
    fn empty_data_row_is_an_empty_record() {
        let rows = rows_from_grid(grid(json!([["Name"], []])));
        assert_eq!(render(&rows), "[{}]");
    }

    #[test]
    fn non_string_cells_are_kept_as_is() {
        let rows = rows_from_grid(grid(json!([[1, true, "x"], [2.5, false, null]])));
        assert_eq!(render(&rows), r#"[{"1":2.5,"true":false,"x":null}]"#);
    }

    #[test]
    fn duplicate_header_keeps_first_position_and_last_value() {
        let rows = rows_from_grid(grid(json!([["A", "B", "A"], ["1", "2", "3"]])));
        assert_eq!(render(&rows), r#"[{"A":"3","B":"2"}]"#);
    }
}
