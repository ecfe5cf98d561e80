//! Time-series report results to a tabular result

use crate::dates::{parse_in_zone, resolve_timezone};
use hogql_connector_types::{
    CellValue, ColumnDefinition, EvidenceType, Result, Row, SeriesResult, TabularResult,
};

/// Fixed output columns of a time-series report
pub const SERIES_COLUMN: &str = "series";
pub const LABEL_COLUMN: &str = "label";
pub const DATE_COLUMN: &str = "date";
pub const VALUE_COLUMN: &str = "value";

/// Buckets before this index are never emitted; the platform puts a partial
/// leading bucket at index 0.
const FIRST_EMITTED_BUCKET: usize = 1;

/// Flatten every series into one row per bucket, with dates anchored in `timezone`.
pub fn map_series_to_rows(series: &[SeriesResult], timezone: &str) -> Result<TabularResult> {
    // Fail on a bad zone even when no bucket carries a date.
    let tz = resolve_timezone(timezone)?;

    let mut rows = Vec::new();
    for entry in series {
        for (index, value) in entry.data.iter().enumerate().skip(FIRST_EMITTED_BUCKET) {
            let label = entry
                .labels
                .as_ref()
                .and_then(|labels| labels.get(index))
                .map_or_else(CellValue::null, |label| CellValue::Json(label.clone().into()));
            let date = match entry.days.as_ref().and_then(|days| days.get(index)) {
                Some(day) => CellValue::Date(parse_in_zone(day, &tz)?),
                None => CellValue::null(),
            };

            let mut row = Row::with_capacity(4);
            row.push(SERIES_COLUMN, CellValue::Json(entry.label.clone().into()));
            row.push(LABEL_COLUMN, label);
            row.push(DATE_COLUMN, date);
            row.push(VALUE_COLUMN, CellValue::Json(value.clone()));
            rows.push(row);
        }
    }

    Ok(TabularResult::new(rows, series_columns()))
}

/// Column manifest of every time-series result, independent of the data
pub fn series_columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::precise(SERIES_COLUMN, EvidenceType::String),
        ColumnDefinition::precise(LABEL_COLUMN, EvidenceType::String),
        ColumnDefinition::precise(DATE_COLUMN, EvidenceType::Date),
        ColumnDefinition::precise(VALUE_COLUMN, EvidenceType::Number),
    ]
}
