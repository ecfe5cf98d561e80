//! Route a saved insight to the mapper for its kind

use crate::series::map_series_to_rows;
use crate::tabular::build_tabular_result;
use hogql_connector_types::{
    ConnectorError, InsightPayload, ReportKind, Result, SeriesResult, TabularResult,
};
use serde::Deserialize;
use serde_json::Value;

/// Map an insight by its `query.source.kind`. Unknown or missing kinds fail.
pub fn dispatch(payload: &InsightPayload) -> Result<TabularResult> {
    match ReportKind::from_tag(payload.kind_tag())? {
        ReportKind::HogQL => {
            let results = Vec::<Vec<Value>>::deserialize(required_result(payload)?)?;
            let types = payload
                .types
                .as_deref()
                .ok_or(ConnectorError::MissingField { field: "types" })?;
            build_tabular_result(&results, types)
        }
        ReportKind::Trends => {
            let series = Vec::<SeriesResult>::deserialize(required_result(payload)?)?;
            let timezone = payload
                .timezone
                .as_deref()
                .ok_or(ConnectorError::MissingField { field: "timezone" })?;
            map_series_to_rows(&series, timezone)
        }
    }
}

fn required_result(payload: &InsightPayload) -> Result<&Value> {
    match &payload.result {
        Some(Value::Null) | None => Err(ConnectorError::MissingField { field: "result" }),
        Some(result) => Ok(result),
    }
}
