//! Payload shapes returned by the analytics API

use crate::data::ColumnTypeDescriptor;
use crate::error::{ConnectorError, Result};
use serde::{Deserialize, Serialize};

/// Raw query response; fields other than `results` and `types` are ignored
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HogQLResponse {
    /// Rows, each a positional array of values
    pub results: Vec<Vec<serde_json::Value>>,
    /// Column name and source type, parallel to each row
    pub types: Vec<ColumnTypeDescriptor>,
}

/// One series of a time-series report
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SeriesResult {
    /// Series name
    pub label: String,
    /// Bucket labels
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Bucket dates, as calendar date/time strings
    #[serde(default)]
    pub days: Option<Vec<String>>,
    /// Bucket values
    pub data: Vec<serde_json::Value>,
}

/// Saved insight as returned by the insights endpoint
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct InsightPayload {
    /// Insight query definition; only `source.kind` is read
    #[serde(default)]
    pub query: Option<serde_json::Value>,
    /// Computed result; shape depends on the kind
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// Column types, present for raw query insights
    #[serde(default)]
    pub types: Option<Vec<ColumnTypeDescriptor>>,
    /// IANA timezone of the project the insight was computed in
    #[serde(default)]
    pub timezone: Option<String>,
}

impl InsightPayload {
    /// The raw `query.source.kind` discriminator, if present
    pub fn kind_tag(&self) -> Option<&serde_json::Value> {
        self.query.as_ref()?.get("source")?.get("kind")
    }
}

/// Report kinds the connector can turn into rows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    /// Insight backed by a raw HogQL query
    HogQL,
    /// Trends insight with per-series time buckets
    Trends,
}

impl ReportKind {
    pub const HOGQL_TAG: &'static str = "HogQLQuery";
    pub const TRENDS_TAG: &'static str = "TrendsQuery";

    pub fn from_tag(tag: Option<&serde_json::Value>) -> Result<Self> {
        match tag.and_then(serde_json::Value::as_str) {
            Some(Self::HOGQL_TAG) => Ok(ReportKind::HogQL),
            Some(Self::TRENDS_TAG) => Ok(ReportKind::Trends),
            _ => Err(ConnectorError::unsupported_kind(tag)),
        }
    }
}
