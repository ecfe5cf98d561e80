//! Shared types for the HogQL connector
//!
//! Types crossing the JS boundary are exported to TypeScript via tsify.

pub mod data;
pub mod error;
pub mod options;
pub mod query;
pub mod report;

pub use data::*;
pub use error::*;
pub use options::*;
pub use query::*;
pub use report::*;
