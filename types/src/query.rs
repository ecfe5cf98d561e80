//! Request plans for the host's HTTP layer

use serde::{Deserialize, Serialize};
use tsify::Tsify;

/// HTTP method of a planned request
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

/// What the response of a planned request should be mapped with
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Raw query response, map with `mapHogQLResponse`
    Hogql,
    /// Saved insight, map with `mapInsightResponse`
    Insight,
}

/// A request the host should send, without authentication headers
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct QueryPlan {
    pub method: HttpMethod,
    pub url: String,
    /// JSON request body for POST requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub response_kind: ResponseKind,
}
