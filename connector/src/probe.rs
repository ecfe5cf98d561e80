//! Connection test: run `SELECT 1` and check the answer

use crate::query::plan_hogql;
use hogql_connector_types::{ConnectorOptions, QueryPlan, Result};
use serde_json::Value;

pub const PROBE_QUERY: &str = "SELECT 1";

pub fn plan_probe(options: &ConnectorOptions) -> Result<QueryPlan> {
    options.validate()?;
    Ok(plan_hogql(options, PROBE_QUERY))
}

/// True when the first value of the first row is the number 1
pub fn probe_succeeded(body: &str) -> bool {
    let response: Value = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(err) => {
            log::error!("Failed to connect: {err}");
            return false;
        }
    };

    let first = response
        .get("results")
        .and_then(|results| results.get(0))
        .and_then(first_value);
    let ok = first.is_some_and(is_one);
    if !ok {
        log::error!("Failed to connect: unexpected probe result {first:?}");
    }
    ok
}

// Rows are positional arrays, or objects keyed by column name.
fn first_value(row: &Value) -> Option<&Value> {
    match row {
        Value::Array(values) => values.first(),
        Value::Object(fields) => fields.values().next(),
        _ => None,
    }
}

fn is_one(value: &Value) -> bool {
    value.as_f64() == Some(1.0)
}
