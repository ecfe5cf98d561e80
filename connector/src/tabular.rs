//! Raw query results to a tabular result

use crate::rows::normalize_row;
use crate::type_mapper::column_definition;
use hogql_connector_types::{ColumnTypeDescriptor, HogQLResponse, Result, TabularResult};
use serde_json::Value;

/// Normalize every row against the shared `types` and build the column manifest.
/// Rows keep their source order, one output row per input row.
pub fn build_tabular_result(
    results: &[Vec<Value>],
    types: &[ColumnTypeDescriptor],
) -> Result<TabularResult> {
    let rows = results
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_row(index, raw, types))
        .collect::<Result<Vec<_>>>()?;
    let column_types = types.iter().map(column_definition).collect();
    Ok(TabularResult::new(rows, column_types))
}

/// Map a raw query response body
pub fn map_hogql_response(response: &HogQLResponse) -> Result<TabularResult> {
    build_tabular_result(&response.results, &response.types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hogql_connector_types::{ConnectorError, EvidenceType, TypeFidelity};
    use serde_json::json;

    fn response() -> HogQLResponse {
        serde_json::from_value(json!({
            "results": [
                ["$pageview", 120, "2024-01-15T00:00:00Z", true],
                ["$autocapture", 45, null, false],
                ["$identify", 3, "2024-01-16T00:00:00Z", null],
            ],
            "types": [
                ["event", "String"],
                ["count", "UInt64"],
                ["day", "Nullable(DateTime('UTC'))"],
                ["is_identified", "Bool"],
            ],
        }))
        .unwrap()
    }

    #[test]
    fn rows_and_columns_line_up() {
        let result = map_hogql_response(&response()).unwrap();

        assert_eq!(result.expected_row_count, 3);
        assert_eq!(result.rows.len(), 3);
        let names: Vec<_> = result.column_types.iter().map(|c| c.name.as_str()).collect();
        for row in &result.rows {
            assert_eq!(row.columns().collect::<Vec<_>>(), names);
        }
        assert_eq!(
            result.rows[1].get("event").and_then(|v| v.as_json()),
            Some(&json!("$autocapture"))
        );
    }

    #[test]
    fn column_manifest() {
        let result = map_hogql_response(&response()).unwrap();
        let types: Vec<_> = result
            .column_types
            .iter()
            .map(|c| (c.evidence_type, c.type_fidelity))
            .collect();
        assert_eq!(
            types,
            vec![
                (EvidenceType::String, TypeFidelity::Precise),
                (EvidenceType::Number, TypeFidelity::Precise),
                (EvidenceType::Date, TypeFidelity::Precise),
                (EvidenceType::Boolean, TypeFidelity::Precise),
            ]
        );
    }

    #[test]
    fn empty_results_keep_columns() {
        let result = build_tabular_result(&[], &response().types).unwrap();
        assert_eq!(result.expected_row_count, 0);
        assert_eq!(result.column_types.len(), 4);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let response = response();
        assert_eq!(
            map_hogql_response(&response).unwrap(),
            map_hogql_response(&response).unwrap()
        );
    }

    #[test]
    fn short_row_fails_whole_result() {
        let mut response = response();
        response.results[2].pop();
        let err = map_hogql_response(&response).unwrap_err();
        assert!(matches!(err, ConnectorError::ColumnCountMismatch { row: 2, .. }));
    }
}
