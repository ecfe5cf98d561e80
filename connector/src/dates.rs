//! Date materialization for date-typed cells and report buckets

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use hogql_connector_types::{ConnectorError, Result};
use serde_json::Value;

const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const OFFSET_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

/// Convert a raw date cell. Strings are ISO-8601 (wall-clock strings are read
/// as UTC); numbers are milliseconds since the Unix epoch.
pub fn parse_date_value(value: &Value) -> Result<DateTime<Utc>> {
    let parsed = match value {
        Value::String(text) => parse_iso_in(text, &Utc),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|millis| millis.trunc() as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };
    parsed.ok_or_else(|| invalid_date(value))
}

/// Parse `text` with wall-clock times anchored in `tz`.
/// An explicit offset in the text wins over the zone.
pub fn parse_in_zone(text: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    parse_iso_in(text, tz).ok_or_else(|| ConnectorError::InvalidDate {
        value: text.to_string(),
    })
}

pub fn resolve_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse::<Tz>()
        .map_err(|_| ConnectorError::UnknownTimezone {
            timezone: timezone.to_string(),
        })
}

fn parse_iso_in<Z: TimeZone>(text: &str, tz: &Z) -> Option<DateTime<Utc>> {
    let text = normalize_separator(text.trim());

    if let Ok(date) = DateTime::parse_from_rfc3339(&text) {
        return Some(date.with_timezone(&Utc));
    }
    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(date) = DateTime::parse_from_str(&text, format) {
            return Some(date.with_timezone(&Utc));
        }
    }

    let naive = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    anchor(naive, tz)
}

/// Wall-clock time in `tz`. Ambiguous times take the earlier instant; times
/// skipped by a DST jump move forward by the jump.
fn anchor<Z: TimeZone>(naive: NaiveDateTime, tz: &Z) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|date| date.with_timezone(&Utc))
}

// "2024-01-15 10:30:00" is accepted the same as "2024-01-15T10:30:00".
fn normalize_separator(text: &str) -> String {
    let mut normalized = text.to_string();
    if normalized.len() > 10 && normalized.as_bytes()[10] == b' ' {
        normalized.replace_range(10..11, "T");
    }
    normalized
}

fn invalid_date(value: &Value) -> ConnectorError {
    let value = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    ConnectorError::InvalidDate { value }
}
