//! HogQL connector - PostHog query results for BI hosts
//!
//! The host fetches from the PostHog API (auth, retries and transport stay on
//! the JS side) and hands response bodies to this crate, which maps them into
//! typed tabular results.

use wasm_bindgen::prelude::*;

pub mod bindings;
pub mod dates;
pub mod dispatch;
pub mod probe;
pub mod query;
pub mod rows;
pub mod series;
pub mod tabular;
pub mod type_mapper;

// Re-export types
pub use hogql_connector_types::data::*;
pub use hogql_connector_types::error::*;
pub use hogql_connector_types::options::*;
pub use hogql_connector_types::report::*;
pub use hogql_connector_types::{HttpMethod, QueryPlan, ResponseKind};

pub use dispatch::dispatch;
pub use rows::normalize_row;
pub use series::map_series_to_rows;
pub use tabular::{build_tabular_result, map_hogql_response};
pub use type_mapper::map_type;

/// Initialize the connector
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(log::Level::Debug).ok();

    log::info!("HogQL connector initialized");
}
