//! JS entry points

use crate::dispatch::dispatch;
use crate::probe;
use crate::query::{self, unwrap_insight_lookup};
use crate::tabular::map_hogql_response;
use crate::type_mapper;
use hogql_connector_types::{
    options_schema, CellValue, ConnectorError, ConnectorOptions, HogQLResponse, QueryPlan,
    TabularResult,
};
use js_sys::{Array, Object, Reflect};
use serde_json::Value;
use wasm_bindgen::prelude::*;

/// Map the body of a raw query response
#[wasm_bindgen(js_name = mapHogQLResponse)]
pub fn map_hogql_response_js(body: &str) -> Result<JsValue, JsValue> {
    let response: HogQLResponse = serde_json::from_str(body).map_err(into_js_error)?;
    let result = map_hogql_response(&response).map_err(into_js_error)?;
    log::debug!("mapped {} hogql rows", result.expected_row_count);
    tabular_to_js(&result)
}

/// Map the body of an insight response. `reference` is the id or short id
/// the insight was requested by.
#[wasm_bindgen(js_name = mapInsightResponse)]
pub fn map_insight_response_js(body: &str, reference: &str) -> Result<JsValue, JsValue> {
    let body: Value = serde_json::from_str(body).map_err(into_js_error)?;
    let insight = unwrap_insight_lookup(body, reference).map_err(into_js_error)?;
    let result = dispatch(&insight).map_err(into_js_error)?;
    log::debug!(
        "mapped {} rows from {:?} insight",
        result.expected_row_count,
        insight.kind_tag().and_then(Value::as_str)
    );
    tabular_to_js(&result)
}

/// Plan the request for a query file; `undefined` for files this connector skips
#[wasm_bindgen(js_name = planQuery)]
pub fn plan_query_js(
    options: ConnectorOptions,
    query_text: &str,
    query_path: &str,
) -> Result<Option<QueryPlan>, JsValue> {
    let plan = query::plan_query(&options, query_text, query_path).map_err(into_js_error)?;
    match &plan {
        Some(plan) => log::debug!("{query_path}: {:?} {}", plan.method, plan.url),
        None => log::debug!("{query_path}: not a query file, skipping"),
    }
    Ok(plan)
}

#[wasm_bindgen(js_name = planProbe)]
pub fn plan_probe_js(options: ConnectorOptions) -> Result<QueryPlan, JsValue> {
    probe::plan_probe(&options).map_err(into_js_error)
}

#[wasm_bindgen(js_name = probeSucceeded)]
pub fn probe_succeeded_js(body: &str) -> bool {
    probe::probe_succeeded(body)
}

/// Error for a non-success HTTP response, in the connector's message format
#[wasm_bindgen(js_name = apiError)]
pub fn api_error_js(status: u16, status_text: &str, body: &str) -> JsValue {
    into_js_error(ConnectorError::api(status, status_text, body))
}

#[wasm_bindgen(js_name = optionsSchema)]
pub fn options_schema_js() -> Result<JsValue, JsValue> {
    let schema: serde_json::Map<String, Value> = options_schema()
        .into_iter()
        .map(|(name, spec)| serde_json::to_value(spec).map(|spec| (name.to_string(), spec)))
        .collect::<Result<_, serde_json::Error>>()
        .map_err(into_js_error)?;
    json_to_js(&Value::Object(schema))
}

/// Host column type of a source type string; `undefined` when unrecognized
#[wasm_bindgen(js_name = mapType)]
pub fn map_type_js(source_type: &str) -> Option<String> {
    type_mapper::map_type(source_type).map(|t| t.as_str().to_string())
}

fn into_js_error(err: impl Into<ConnectorError>) -> JsValue {
    JsError::from(err.into()).into()
}

/// Build the host object; date cells become JS `Date` instances.
fn tabular_to_js(result: &TabularResult) -> Result<JsValue, JsValue> {
    let rows = Array::new();
    for row in &result.rows {
        let object = Object::new();
        for (column, cell) in row.iter() {
            Reflect::set(&object, &JsValue::from_str(column), &cell_to_js(cell)?)?;
        }
        rows.push(&object);
    }

    let column_types = Array::new();
    for column in &result.column_types {
        let object = Object::new();
        Reflect::set(&object, &"name".into(), &JsValue::from_str(&column.name))?;
        Reflect::set(
            &object,
            &"evidenceType".into(),
            &column.evidence_type.as_str().into(),
        )?;
        Reflect::set(
            &object,
            &"typeFidelity".into(),
            &column.type_fidelity.as_str().into(),
        )?;
        column_types.push(&object);
    }

    let output = Object::new();
    Reflect::set(&output, &"rows".into(), &rows)?;
    Reflect::set(&output, &"columnTypes".into(), &column_types)?;
    Reflect::set(
        &output,
        &"expectedRowCount".into(),
        &JsValue::from_f64(result.expected_row_count as f64),
    )?;
    Ok(output.into())
}

fn cell_to_js(cell: &CellValue) -> Result<JsValue, JsValue> {
    match cell {
        CellValue::Date(date) => {
            let millis = JsValue::from_f64(date.timestamp_millis() as f64);
            Ok(js_sys::Date::new(&millis).into())
        }
        CellValue::Json(value) => json_to_js(value),
    }
}

fn json_to_js(value: &Value) -> Result<JsValue, JsValue> {
    Ok(match value {
        Value::Null => JsValue::NULL,
        Value::Bool(flag) => JsValue::from_bool(*flag),
        Value::Number(number) => number
            .as_f64()
            .map_or(JsValue::NULL, JsValue::from_f64),
        Value::String(text) => JsValue::from_str(text),
        Value::Array(items) => {
            let array = Array::new();
            for item in items {
                array.push(&json_to_js(item)?);
            }
            array.into()
        }
        Value::Object(fields) => {
            let object = Object::new();
            for (key, item) in fields {
                Reflect::set(&object, &JsValue::from_str(key), &json_to_js(item)?)?;
            }
            object.into()
        }
    })
}
