//! # Structural Pass
//!
//! Runs the published JSON Schema of a contract against a wire-named
//! document and converts every error into a [`Violation`]. This pass owns
//! presence, primitive types, literal tags, enumerations, non-emptiness,
//! non-negative counts and the SHA-256 hex pattern.
//!
//! The validator is compiled per call from the embedded schema text; no
//! state is shared between calls.

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, Validator};
use serde_json::Value;

use crate::contract::ContractKind;
use crate::error::ContractError;
use crate::violation::{pointer_push, ContractViolations, Violation, ViolationKind};

/// Compile the embedded schema of `kind`.
///
/// # Errors
///
/// Returns [`ContractError::SchemaBuild`] if the embedded schema is not
/// valid JSON or not a valid Draft 2020-12 schema.
pub fn build_validator(kind: ContractKind) -> Result<Validator, ContractError> {
    let schema: Value =
        serde_json::from_str(kind.schema_source()).map_err(|e| ContractError::SchemaBuild {
            contract: kind,
            reason: format!("embedded {} is not valid JSON: {e}", kind.schema_file()),
        })?;

    let mut opts = jsonschema::options();
    opts.with_draft(Draft::Draft202012);
    opts.build(&schema).map_err(|e| ContractError::SchemaBuild {
        contract: kind,
        reason: e.to_string(),
    })
}

/// Validate `document` against the schema of `kind`, recording violations.
pub(crate) fn check(
    kind: ContractKind,
    document: &Value,
    violations: &mut ContractViolations,
) -> Result<(), ContractError> {
    let validator = build_validator(kind)?;

    for error in validator.iter_errors(document) {
        let instance_path = error.instance_path.to_string();
        let (path, violation_kind) = classify(&error.kind, instance_path);
        violations.push(Violation::new(path, violation_kind, error.to_string()));
    }
    Ok(())
}

/// Map a jsonschema error to a violation kind. `Required` errors are
/// reported at the parent object; the missing property is appended so the
/// path names the absent field itself.
fn classify(kind: &ValidationErrorKind, instance_path: String) -> (String, ViolationKind) {
    match kind {
        ValidationErrorKind::Required { property } => {
            let name = property.as_str().unwrap_or_default();
            (pointer_push(&instance_path, name), ViolationKind::MissingField)
        }
        ValidationErrorKind::Type { .. } => (instance_path, ViolationKind::WrongType),
        ValidationErrorKind::Constant { .. } | ValidationErrorKind::Enum { .. } => {
            (instance_path, ViolationKind::LiteralMismatch)
        }
        ValidationErrorKind::Pattern { .. } => (instance_path, ViolationKind::PatternMismatch),
        ValidationErrorKind::MinLength { .. }
        | ValidationErrorKind::MinItems { .. }
        | ValidationErrorKind::MinProperties { .. } => (instance_path, ViolationKind::EmptyValue),
        ValidationErrorKind::Minimum { .. } | ValidationErrorKind::Maximum { .. } => {
            (instance_path, ViolationKind::OutOfRange)
        }
        _ => (instance_path, ViolationKind::Other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn violations_for(kind: ContractKind, doc: &Value) -> ContractViolations {
        let mut violations = ContractViolations::default();
        check(kind, doc, &mut violations).unwrap();
        violations
    }

    #[test]
    fn test_all_embedded_schemas_compile() {
        for kind in ContractKind::ALL {
            assert!(build_validator(kind).is_ok(), "{kind} schema failed to compile");
        }
    }

    #[test]
    fn test_missing_field_path_names_the_field() {
        let v = violations_for(ContractKind::JobResult, &json!({"schemaVersion": "etl-result@v1"}));
        assert!(v.contains("/runId", ViolationKind::MissingField), "{v}");
        assert!(v.contains("/stats", ViolationKind::MissingField));
        assert!(v.contains("/outputs", ViolationKind::MissingField));
        assert!(v.contains("/status", ViolationKind::MissingField));
    }

    #[test]
    fn test_root_type_error() {
        let v = violations_for(ContractKind::Manifest, &json!([1, 2]));
        assert!(v.contains("", ViolationKind::WrongType), "{v}");
    }

    #[test]
    fn test_every_bad_field_reported() {
        let doc = json!({
            "schemaVersion": "etl-result@v1",
            "runId": "",
            "status": "done",
            "stats": {"documentsProcessed": -1, "triplesEmitted": "many", "filesWritten": 0},
            "outputs": {"turtleFiles": [], "manifest": "m.json"}
        });
        let v = violations_for(ContractKind::JobResult, &doc);
        assert!(v.contains("/runId", ViolationKind::EmptyValue), "{v}");
        assert!(v.contains("/status", ViolationKind::LiteralMismatch));
        assert!(v.contains("/stats/documentsProcessed", ViolationKind::OutOfRange));
        assert!(v.contains("/stats/triplesEmitted", ViolationKind::WrongType));
        assert!(v.contains("/outputs/turtleFiles", ViolationKind::EmptyValue));
        assert_eq!(v.len(), 5);
    }

    #[test]
    fn test_pattern_mismatch_on_fingerprint() {
        let doc = json!({
            "provenance": {
                "inputFingerprints": [{"documentId": "d1", "contentFingerprint": "xyz"}]
            }
        });
        let v = violations_for(ContractKind::Manifest, &doc);
        assert!(
            v.contains("/provenance/inputFingerprints/0/contentFingerprint", ViolationKind::PatternMismatch),
            "{v}"
        );
    }
}
