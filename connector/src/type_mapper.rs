//! Source type string to host column type

use hogql_connector_types::{ColumnDefinition, ColumnTypeDescriptor, EvidenceType, TypeFidelity};

/// Prefix shared by every date/time source type (`DateTime`, `DateTime64(3, 'UTC')`, ...)
pub const DATE_TIME_MARKER: &str = "DateTime";

const NULLABLE_PREFIX: &str = "Nullable(";

/// Resolve a source type string, or `None` when it is not recognized.
///
/// Exact names are checked first, then the date/time prefix, then the
/// `Nullable(...)` wrapper, which is unwrapped recursively.
pub fn map_type(source_type: &str) -> Option<EvidenceType> {
    match source_type {
        "Bool" => Some(EvidenceType::Boolean),
        "UInt8" | "UInt16" | "UInt32" | "UInt64" | "Int8" | "Int16" | "Int32" | "Int64"
        | "Float32" | "Float64" => Some(EvidenceType::Number),
        "String" | "UUID" | "LowCardinality(String)" => Some(EvidenceType::String),
        _ if source_type.starts_with(DATE_TIME_MARKER) => Some(EvidenceType::Date),
        _ => unwrap_nullable(source_type).and_then(map_type),
    }
}

/// Inner type of `Nullable(<inner>)`; `None` if the wrapper is absent or unterminated
fn unwrap_nullable(source_type: &str) -> Option<&str> {
    source_type
        .strip_prefix(NULLABLE_PREFIX)?
        .strip_suffix(')')
}

/// True when values of this column must be materialized as dates.
///
/// Same resolution as the column manifest, so `Nullable(DateTime)` counts
/// while containers of dates such as `Array(DateTime)` do not.
pub fn is_date_type(source_type: &str) -> bool {
    map_type(source_type) == Some(EvidenceType::Date)
}

/// Manifest entry for one column; unknown types fall back to an inferred string
pub fn column_definition(descriptor: &ColumnTypeDescriptor) -> ColumnDefinition {
    let (evidence_type, type_fidelity) = match map_type(&descriptor.source_type) {
        Some(evidence_type) => (evidence_type, TypeFidelity::Precise),
        None => (EvidenceType::String, TypeFidelity::Inferred),
    };
    ColumnDefinition {
        name: descriptor.name.clone(),
        evidence_type,
        type_fidelity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bool")]
    #[case("Nullable(Bool)")]
    fn boolean_types(#[case] source_type: &str) {
        assert_eq!(map_type(source_type), Some(EvidenceType::Boolean));
    }

    #[rstest]
    #[case("UInt8")]
    #[case("UInt16")]
    #[case("UInt32")]
    #[case("UInt64")]
    #[case("Int8")]
    #[case("Int16")]
    #[case("Int32")]
    #[case("Int64")]
    #[case("Float32")]
    #[case("Float64")]
    #[case("Nullable(Float64)")]
    fn numeric_types(#[case] source_type: &str) {
        assert_eq!(map_type(source_type), Some(EvidenceType::Number));
    }

    #[rstest]
    #[case("String")]
    #[case("UUID")]
    #[case("LowCardinality(String)")]
    #[case("Nullable(String)")]
    fn string_types(#[case] source_type: &str) {
        assert_eq!(map_type(source_type), Some(EvidenceType::String));
    }

    #[rstest]
    #[case("DateTime")]
    #[case("DateTime64(3, 'UTC')")]
    #[case("DateTime64(6, 'America/New_York')")]
    #[case("DateTime('Europe/Berlin')")]
    #[case("Nullable(DateTime64(6, 'UTC'))")]
    fn date_types(#[case] source_type: &str) {
        assert_eq!(map_type(source_type), Some(EvidenceType::Date));
    }

    #[rstest]
    #[case("")]
    #[case("Array(String)")]
    #[case("Decimal(10, 2)")]
    #[case("Date")]
    #[case("Tuple(UInt8, String)")]
    #[case("LowCardinality(Nullable(String))")]
    #[case("Nullable(")]
    #[case("Nullable(UInt8")]
    #[case("Nullable()")]
    #[case("uint32")]
    fn unresolved_types(#[case] source_type: &str) {
        assert_eq!(map_type(source_type), None);
    }

    #[test]
    fn nullable_resolves_like_inner() {
        assert_eq!(map_type("Nullable(UInt32)"), map_type("UInt32"));
        assert_eq!(
            map_type("Nullable(Nullable(Bool))"),
            Some(EvidenceType::Boolean)
        );
    }

    #[test]
    fn date_detection_sees_through_wrappers() {
        assert!(is_date_type("DateTime64(3, 'UTC')"));
        assert!(is_date_type("Nullable(DateTime)"));
        assert!(!is_date_type("String"));
    }

    #[rstest]
    #[case("Array(DateTime64(6, 'UTC'))")]
    #[case("Tuple(DateTime, String)")]
    #[case("Map(String, DateTime)")]
    #[case("Nullable(Array(DateTime))")]
    fn date_containers_are_not_dates(#[case] source_type: &str) {
        assert!(!is_date_type(source_type));
        assert_eq!(map_type(source_type), None);
    }

    #[test]
    fn definition_fidelity() {
        let precise = column_definition(&ColumnTypeDescriptor::new("count", "UInt32"));
        assert_eq!(precise.evidence_type, EvidenceType::Number);
        assert_eq!(precise.type_fidelity, TypeFidelity::Precise);

        let inferred = column_definition(&ColumnTypeDescriptor::new("tags", "Array(String)"));
        assert_eq!(inferred.name, "tags");
        assert_eq!(inferred.evidence_type, EvidenceType::String);
        assert_eq!(inferred.type_fidelity, TypeFidelity::Inferred);
    }
}
