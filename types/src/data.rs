//! Tabular result types handed back to the BI host

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tsify::Tsify;

/// Column type as understood by the host
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceType {
    String,
    Number,
    Boolean,
    Date,
}

impl EvidenceType {
    pub fn as_str(self) -> &'static str {
        match self {
            EvidenceType::String => "string",
            EvidenceType::Number => "number",
            EvidenceType::Boolean => "boolean",
            EvidenceType::Date => "date",
        }
    }
}

/// Whether a column type was read from the source schema or guessed
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
pub enum TypeFidelity {
    /// Source type string was recognized
    Precise,
    /// Source type string was unknown, type defaulted to string
    Inferred,
}

impl TypeFidelity {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeFidelity::Precise => "precise",
            TypeFidelity::Inferred => "inferred",
        }
    }
}

/// Column entry of a raw query `types` array, delivered as `[name, sourceType]`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ColumnTypeDescriptor {
    /// Column name
    pub name: String,
    /// Source type string, e.g. `Nullable(DateTime64(6, 'UTC'))`
    pub source_type: String,
}

impl ColumnTypeDescriptor {
    pub fn new(name: impl Into<String>, source_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_type: source_type.into(),
        }
    }
}

impl From<(String, String)> for ColumnTypeDescriptor {
    fn from((name, source_type): (String, String)) -> Self {
        Self { name, source_type }
    }
}

impl From<ColumnTypeDescriptor> for (String, String) {
    fn from(descriptor: ColumnTypeDescriptor) -> Self {
        (descriptor.name, descriptor.source_type)
    }
}

/// Column definition in the output manifest
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,
    /// Canonical column type
    pub evidence_type: EvidenceType,
    /// How the type was determined
    pub type_fidelity: TypeFidelity,
}

impl ColumnDefinition {
    /// Definition for a column whose type is known up front
    pub fn precise(name: impl Into<String>, evidence_type: EvidenceType) -> Self {
        Self {
            name: name.into(),
            evidence_type,
            type_fidelity: TypeFidelity::Precise,
        }
    }
}

/// A single output cell
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    /// Value passed through from the payload unchanged
    Json(serde_json::Value),
    /// Materialized date
    Date(DateTime<Utc>),
}

impl CellValue {
    pub fn null() -> Self {
        CellValue::Json(serde_json::Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Json(serde_json::Value::Null))
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            CellValue::Json(value) => Some(value),
            CellValue::Date(_) => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            CellValue::Date(date) => Some(date),
            CellValue::Json(_) => None,
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        CellValue::Json(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(date: DateTime<Utc>) -> Self {
        CellValue::Date(date)
    }
}

// Dates use the same shape as JS `Date#toJSON`.
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Json(value) => value.serialize(serializer),
            CellValue::Date(date) => {
                serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }
}

/// One output row; fields keep column order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, CellValue)>,
}

impl Row {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Append a field. Columns are expected to be unique per row.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(column, _)| column.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(column, value)| (column.as_str(), value))
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Result set in the shape the host consumes
#[derive(Tsify, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabularResult {
    /// Rows in source order
    #[tsify(type = "Record<string, unknown>[]")]
    pub rows: Vec<Row>,
    /// One definition per column, in column order
    pub column_types: Vec<ColumnDefinition>,
    /// Always equal to `rows.len()`
    pub expected_row_count: usize,
}

impl TabularResult {
    pub fn new(rows: Vec<Row>, column_types: Vec<ColumnDefinition>) -> Self {
        let expected_row_count = rows.len();
        Self {
            rows,
            column_types,
            expected_row_count,
        }
    }
}
