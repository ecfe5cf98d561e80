//! Turn a query file into the request the host should send

use hogql_connector_types::{
    ConnectorError, ConnectorOptions, HttpMethod, InsightPayload, QueryPlan, ReportKind,
    ResponseKind, Result,
};
use serde_json::{json, Value};

pub const HOGQL_EXTENSION: &str = ".sql";
pub const INSIGHT_EXTENSION: &str = ".insight";

/// How a query file is interpreted, decided by its extension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryFile {
    /// Raw HogQL text
    HogQL,
    /// Numeric id or short id of a saved insight
    Insight,
}

impl QueryFile {
    /// `None` for files this connector does not handle
    pub fn from_path(path: &str) -> Option<Self> {
        if path.ends_with(HOGQL_EXTENSION) {
            Some(QueryFile::HogQL)
        } else if path.ends_with(INSIGHT_EXTENSION) {
            Some(QueryFile::Insight)
        } else {
            None
        }
    }
}

/// Drop one trailing `;` and the whitespace after it; the query endpoint rejects it.
pub fn trim_statement(text: &str) -> &str {
    match text.trim_end().strip_suffix(';') {
        Some(statement) => statement,
        None => text,
    }
}

/// Plan the request for one query file
pub fn plan_query(options: &ConnectorOptions, text: &str, path: &str) -> Result<Option<QueryPlan>> {
    let Some(file) = QueryFile::from_path(path) else {
        return Ok(None);
    };
    options.validate()?;

    let plan = match file {
        QueryFile::HogQL => plan_hogql(options, trim_statement(text)),
        QueryFile::Insight => plan_insight(options, text.trim()),
    };
    Ok(Some(plan))
}

/// POST a HogQL statement to the project's query endpoint
pub fn plan_hogql(options: &ConnectorOptions, statement: &str) -> QueryPlan {
    let body = json!({
        "query": {
            "kind": ReportKind::HOGQL_TAG,
            "query": statement,
        },
    });
    QueryPlan {
        method: HttpMethod::Post,
        url: format!("{}/query/", project_url(options)),
        body: Some(body.to_string()),
        response_kind: ResponseKind::Hogql,
    }
}

/// GET a saved insight by numeric id, or look it up by short id
pub fn plan_insight(options: &ConnectorOptions, reference: &str) -> QueryPlan {
    let url = if !reference.is_empty() && reference.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}/insights/{}/", project_url(options), reference)
    } else {
        format!(
            "{}/insights/?short_id={}",
            project_url(options),
            urlencoding::encode(reference)
        )
    };
    QueryPlan {
        method: HttpMethod::Get,
        url,
        body: None,
        response_kind: ResponseKind::Insight,
    }
}

fn project_url(options: &ConnectorOptions) -> String {
    format!(
        "{}/api/projects/{}",
        options.base_url(),
        urlencoding::encode(options.project_id.trim())
    )
}

/// A short id lookup answers with a page of insights; take the first.
/// Bodies fetched by numeric id are the insight itself.
pub fn unwrap_insight_lookup(body: Value, reference: &str) -> Result<InsightPayload> {
    let insight = match body {
        Value::Object(mut page) if page.contains_key("results") && !page.contains_key("query") => {
            let first = match page.remove("results") {
                Some(Value::Array(results)) => results.into_iter().next(),
                _ => None,
            };
            first.ok_or_else(|| ConnectorError::InsightNotFound {
                reference: reference.to_string(),
            })?
        }
        insight => insight,
    };
    Ok(serde_json::from_value(insight)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn options() -> ConnectorOptions {
        ConnectorOptions {
            app_host: "https://us.posthog.com/".into(),
            project_id: "1234".into(),
            api_key: "phx_secret".into(),
        }
    }

    #[rstest]
    #[case("SELECT 1;", "SELECT 1")]
    #[case("SELECT 1;  \n", "SELECT 1")]
    #[case("SELECT 1", "SELECT 1")]
    #[case("SELECT 1;;", "SELECT 1;")]
    #[case("SELECT ';' AS s", "SELECT ';' AS s")]
    #[case("SELECT 1 \n", "SELECT 1 \n")]
    fn trims_trailing_terminator(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(trim_statement(text), expected);
    }

    #[rstest]
    #[case("queries/events.sql", Some(QueryFile::HogQL))]
    #[case("queries/signups.insight", Some(QueryFile::Insight))]
    #[case("queries/notes.md", None)]
    #[case("queries/sql", None)]
    fn routes_by_extension(#[case] path: &str, #[case] expected: Option<QueryFile>) {
        assert_eq!(QueryFile::from_path(path), expected);
    }

    #[test]
    fn hogql_plan() {
        let plan = plan_query(&options(), "SELECT event FROM events;\n", "events.sql")
            .unwrap()
            .unwrap();

        assert_eq!(plan.method, HttpMethod::Post);
        assert_eq!(plan.url, "https://us.posthog.com/api/projects/1234/query/");
        assert_eq!(plan.response_kind, ResponseKind::Hogql);
        let body: Value = serde_json::from_str(plan.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"query": {"kind": "HogQLQuery", "query": "SELECT event FROM events"}})
        );
    }

    #[test]
    fn insight_plan_by_id_and_short_id() {
        let by_id = plan_query(&options(), " 42\n", "weekly.insight").unwrap().unwrap();
        assert_eq!(by_id.method, HttpMethod::Get);
        assert_eq!(by_id.url, "https://us.posthog.com/api/projects/1234/insights/42/");
        assert!(by_id.body.is_none());

        let by_short_id = plan_query(&options(), "aB3x9Kq", "weekly.insight").unwrap().unwrap();
        assert_eq!(
            by_short_id.url,
            "https://us.posthog.com/api/projects/1234/insights/?short_id=aB3x9Kq"
        );
        assert_eq!(by_short_id.response_kind, ResponseKind::Insight);
    }

    #[test]
    fn unhandled_file_is_skipped_before_validation() {
        let plan = plan_query(&ConnectorOptions::default(), "", "README.md").unwrap();
        assert!(plan.is_none());
    }

    #[test]
    fn invalid_options_fail_planning() {
        let err = plan_query(&ConnectorOptions::default(), "SELECT 1", "a.sql").unwrap_err();
        assert!(matches!(err, ConnectorError::InvalidOptions { field: "projectId" }));
    }

    #[test]
    fn lookup_page_unwraps_first_insight() {
        let body = json!({
            "count": 1,
            "results": [{"query": {"source": {"kind": "TrendsQuery"}}, "timezone": "UTC"}],
        });
        let insight = unwrap_insight_lookup(body, "aB3x9Kq").unwrap();
        assert_eq!(insight.kind_tag(), Some(&json!("TrendsQuery")));
    }

    #[test]
    fn empty_lookup_page_is_not_found() {
        let err = unwrap_insight_lookup(json!({"count": 0, "results": []}), "gone").unwrap_err();
        assert!(matches!(err, ConnectorError::InsightNotFound { ref reference } if reference == "gone"));
    }

    #[test]
    fn direct_insight_is_unchanged() {
        let body = json!({
            "query": {"source": {"kind": "HogQLQuery"}},
            "result": [[1]],
            "types": [["n", "UInt8"]],
        });
        let insight = unwrap_insight_lookup(body, "42").unwrap();
        assert_eq!(insight.types.unwrap().len(), 1);
    }
}
