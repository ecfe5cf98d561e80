//! Positional raw rows to named rows

use crate::dates::parse_date_value;
use crate::type_mapper::is_date_type;
use hogql_connector_types::{CellValue, ColumnTypeDescriptor, ConnectorError, Result, Row};
use serde_json::Value;

/// Name the values of one raw row after `types`, materializing date columns.
///
/// `index` is the row's position in the result and only used in errors.
pub fn normalize_row(index: usize, raw: &[Value], types: &[ColumnTypeDescriptor]) -> Result<Row> {
    if raw.len() != types.len() {
        return Err(ConnectorError::ColumnCountMismatch {
            row: index,
            expected: types.len(),
            actual: raw.len(),
        });
    }

    let mut row = Row::with_capacity(types.len());
    for (value, column) in raw.iter().zip(types) {
        let cell = if is_date_type(&column.source_type) && !value.is_null() {
            CellValue::Date(parse_date_value(value)?)
        } else {
            CellValue::Json(value.clone())
        };
        row.push(column.name.as_str(), cell);
    }
    Ok(row)
}
