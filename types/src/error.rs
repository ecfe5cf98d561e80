//! Error taxonomy shared by every connector operation

use thiserror::Error;

/// Placeholder used when a report carries no kind discriminator
pub const MISSING_KIND: &str = "<missing>";

pub type Result<T> = std::result::Result<T, ConnectorError>;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("unsupported report kind: {kind}")]
    UnsupportedReportKind { kind: String },

    #[error("row {row} has {actual} values but {expected} columns were declared")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("report payload is missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("cannot read `{value}` as a date")]
    InvalidDate { value: String },

    #[error("unknown timezone `{timezone}`")]
    UnknownTimezone { timezone: String },

    #[error("malformed payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("no insight found for `{reference}`")]
    InsightNotFound { reference: String },

    #[error("connector option `{field}` is required")]
    InvalidOptions { field: &'static str },

    #[error("{status} {status_text}: {body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },
}

impl ConnectorError {
    /// Name the offending discriminator: strings as-is, other values as JSON text
    pub fn unsupported_kind(kind: Option<&serde_json::Value>) -> Self {
        let kind = match kind {
            None => MISSING_KIND.to_string(),
            Some(serde_json::Value::String(tag)) => tag.clone(),
            Some(other) => other.to_string(),
        };
        ConnectorError::UnsupportedReportKind { kind }
    }

    /// Build the error for a non-success HTTP response
    pub fn api(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        ConnectorError::Api {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unsupported_kind_names_the_value() {
        let err = ConnectorError::unsupported_kind(Some(&json!("FunnelsQuery")));
        assert_eq!(err.to_string(), "unsupported report kind: FunnelsQuery");

        let err = ConnectorError::unsupported_kind(Some(&json!(7)));
        assert_eq!(err.to_string(), "unsupported report kind: 7");

        let err = ConnectorError::unsupported_kind(None);
        assert_eq!(err.to_string(), "unsupported report kind: <missing>");
    }

    #[test]
    fn api_error_matches_fetch_failure_text() {
        let err = ConnectorError::api(403, "Forbidden", "{\"detail\":\"nope\"}");
        assert_eq!(err.to_string(), "403 Forbidden: {\"detail\":\"nope\"}");
    }
}
