//! # Field and Cross-Field Rules
//!
//! Semantic rules that a JSON Schema cannot express well: ISO-8601
//! datetimes, exactly-one-of field pairs, and manifest chronology. Datetime
//! checks run on the normalized document alongside the structural pass;
//! the remaining rules run on typed records.

use std::cmp::Ordering;

use etlc_core::IsoDateTime;
use serde_json::Value;

use crate::violation::{ContractViolations, Violation, ViolationKind};

/// Check every string found at `pointers` for ISO-8601 validity.
///
/// Absent fields and non-string values are skipped; the structural pass
/// already reports those.
pub(crate) fn check_datetimes(
    document: &Value,
    pointers: &[&str],
    violations: &mut ContractViolations,
) {
    for pointer in pointers {
        if let Some(Value::String(s)) = document.pointer(pointer) {
            if let Err(e) = IsoDateTime::parse(s.as_str()) {
                violations.push(Violation::new(*pointer, ViolationKind::InvalidDateTime, e.to_string()));
            }
        }
    }
}

/// Require exactly one of two fields of the record at `path` to be present.
///
/// Each side is given as its wire name and whether it counts as present.
pub(crate) fn exactly_one(
    path: &str,
    first: (&str, bool),
    second: (&str, bool),
    violations: &mut ContractViolations,
) {
    let (first_name, has_first) = first;
    let (second_name, has_second) = second;
    if has_first == has_second {
        let found = if has_first { "both were" } else { "neither was" };
        violations.push(Violation::new(
            path,
            ViolationKind::MutualExclusion,
            format!("either {first_name} or {second_name} must be provided, but not both ({found} given)"),
        ));
    }
}

/// Require `completed` to be no earlier than `created`.
///
/// Aware and naive datetimes cannot be ordered; such pairs are accepted.
pub(crate) fn check_chronology(
    created: &IsoDateTime,
    completed: &IsoDateTime,
    path: &str,
    violations: &mut ContractViolations,
) {
    match completed.compare(created) {
        Some(Ordering::Less) => violations.push(Violation::new(
            path,
            ViolationKind::Chronology,
            format!("completedAt {completed} is earlier than createdAt {created}"),
        )),
        Some(_) => {}
        None => tracing::debug!(
            %created,
            %completed,
            "skipping chronology check between offset-aware and naive datetimes"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_datetime_violations_collected() {
        let doc = json!({"createdAt": "yesterday", "completedAt": "2024-01-01T00:00:00Z"});
        let mut v = ContractViolations::default();
        check_datetimes(&doc, &["/createdAt", "/completedAt", "/missing"], &mut v);
        assert_eq!(v.len(), 1);
        assert!(v.contains("/createdAt", ViolationKind::InvalidDateTime));
    }

    #[test]
    fn test_non_string_datetime_left_to_structural_pass() {
        let doc = json!({"createdAt": 20240101});
        let mut v = ContractViolations::default();
        check_datetimes(&doc, &["/createdAt"], &mut v);
        assert!(v.is_empty());
    }

    #[test]
    fn test_exactly_one_truth_table() {
        for (a, b, ok) in [(true, false, true), (false, true, true), (true, true, false), (false, false, false)] {
            let mut v = ContractViolations::default();
            exactly_one("/input", ("documentIds", a), ("query", b), &mut v);
            assert_eq!(v.is_empty(), ok, "{a} {b}");
        }
    }

    #[test]
    fn test_chronology() {
        let created = IsoDateTime::parse("2024-01-01T12:00:00Z").unwrap();
        let before = IsoDateTime::parse("2024-01-01T13:00:00+02:00").unwrap();
        let after = IsoDateTime::parse("2024-01-01T12:00:01Z").unwrap();
        let naive = IsoDateTime::parse("2023-01-01T00:00:00").unwrap();

        let mut v = ContractViolations::default();
        check_chronology(&created, &before, "/completedAt", &mut v);
        assert!(v.contains("/completedAt", ViolationKind::Chronology));

        let mut v = ContractViolations::default();
        check_chronology(&created, &after, "/completedAt", &mut v);
        check_chronology(&created, &created, "/completedAt", &mut v);
        check_chronology(&created, &naive, "/completedAt", &mut v);
        assert!(v.is_empty());
    }
}
