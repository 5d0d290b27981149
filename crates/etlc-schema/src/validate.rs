//! # Validation Entry Points
//!
//! One entry point per contract. Each accepts raw JSON text or an already
//! parsed [`serde_json::Value`] and returns the typed record or a
//! [`ContractError`] listing every violation found.
//!
//! ## Pipeline
//!
//! 1. Parse text (failure is [`ContractError::MalformedJson`]).
//! 2. Capture the observed `schemaVersion` for error reporting.
//! 3. Version gate: a present but different version tag rejects the payload
//!    without looking at anything else.
//! 4. Rewrite internal field names to wire names.
//! 5. Structural pass against the published JSON Schema, plus datetime
//!    checks. Any violation so far ends validation here.
//! 6. Deserialize into the typed record and run its cross-field rules.

use serde_json::Value;

use crate::aliases;
use crate::config::ValidationConfig;
use crate::contract::{Contract, ContractKind};
use crate::error::ContractError;
use crate::manifest::EtlManifest;
use crate::request::EtlJobRequest;
use crate::result::EtlJobResult;
use crate::rules;
use crate::structural;
use crate::violation::{ContractViolations, Violation, ViolationKind};

/// Input accepted by the validation entry points.
#[derive(Debug, Clone, Copy)]
pub enum RawPayload<'a> {
    /// JSON text, parsed before validation.
    Text(&'a str),
    /// An already parsed document.
    Value(&'a Value),
}

impl<'a> From<&'a str> for RawPayload<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for RawPayload<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a Value> for RawPayload<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(value)
    }
}

/// Validate an ETL job request with the default configuration.
pub fn validate_job_request<'a>(
    input: impl Into<RawPayload<'a>>,
) -> Result<EtlJobRequest, ContractError> {
    validate_contract(input, &ValidationConfig::default())
}

/// Validate an ETL job request.
pub fn validate_job_request_with<'a>(
    input: impl Into<RawPayload<'a>>,
    config: &ValidationConfig,
) -> Result<EtlJobRequest, ContractError> {
    validate_contract(input, config)
}

/// Validate an ETL job result with the default configuration.
pub fn validate_job_result<'a>(
    input: impl Into<RawPayload<'a>>,
) -> Result<EtlJobResult, ContractError> {
    validate_contract(input, &ValidationConfig::default())
}

/// Validate an ETL job result.
pub fn validate_job_result_with<'a>(
    input: impl Into<RawPayload<'a>>,
    config: &ValidationConfig,
) -> Result<EtlJobResult, ContractError> {
    validate_contract(input, config)
}

/// Validate an ETL manifest with the default configuration.
pub fn validate_manifest<'a>(
    input: impl Into<RawPayload<'a>>,
) -> Result<EtlManifest, ContractError> {
    validate_contract(input, &ValidationConfig::default())
}

/// Validate an ETL manifest.
pub fn validate_manifest_with<'a>(
    input: impl Into<RawPayload<'a>>,
    config: &ValidationConfig,
) -> Result<EtlManifest, ContractError> {
    validate_contract(input, config)
}

/// Validate a payload against the contract of `C`.
///
/// # Errors
///
/// - [`ContractError::MalformedJson`] if text input is not JSON.
/// - [`ContractError::ContractViolation`] carrying every violation found.
/// - [`ContractError::SchemaBuild`] if the embedded schema fails to compile.
pub fn validate_contract<'a, C: Contract>(
    input: impl Into<RawPayload<'a>>,
    config: &ValidationConfig,
) -> Result<C, ContractError> {
    let kind = C::KIND;
    let parsed;
    let document = match input.into() {
        RawPayload::Text(text) => {
            parsed = parse_json(kind, text)?;
            &parsed
        }
        RawPayload::Value(value) => value,
    };

    let schema_version = observed_schema_version(document);
    let rejected = |violations: ContractViolations| {
        tracing::debug!(
            contract = %kind,
            schema_version = schema_version.as_deref().unwrap_or("<none>"),
            violations = violations.len(),
            "contract validation failed"
        );
        ContractError::ContractViolation {
            contract: kind,
            schema_version: schema_version.clone(),
            violations,
        }
    };

    if let Some(mismatch) = version_gate(kind, document) {
        return Err(rejected(ContractViolations::single(mismatch)));
    }

    let mut violations = ContractViolations::default();
    let normalized = aliases::normalize(document, kind.record(), config.unknown_fields, &mut violations);
    structural::check(kind, &normalized, &mut violations)?;
    rules::check_datetimes(&normalized, C::DATETIME_FIELDS, &mut violations);
    if !violations.is_empty() {
        return Err(rejected(violations));
    }

    let record: C = serde_json::from_value(normalized).map_err(|e| {
        rejected(ContractViolations::single(Violation::new(
            "",
            ViolationKind::WrongType,
            e.to_string(),
        )))
    })?;

    record.check_rules(config, &mut violations);
    if !violations.is_empty() {
        return Err(rejected(violations));
    }

    tracing::debug!(contract = %kind, "contract validation passed");
    Ok(record)
}

/// Parse JSON text for `kind`.
///
/// # Errors
///
/// Returns [`ContractError::MalformedJson`] with the parser's position.
pub fn parse_json(kind: ContractKind, text: &str) -> Result<Value, ContractError> {
    serde_json::from_str(text).map_err(|e| ContractError::MalformedJson {
        contract: kind,
        message: e.to_string(),
        line: e.line(),
        column: e.column(),
    })
}

/// The `schemaVersion` string of a document, under either spelling.
pub fn observed_schema_version(document: &Value) -> Option<String> {
    let obj = document.as_object()?;
    obj.get("schemaVersion")
        .or_else(|| obj.get("schema_version"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn version_gate(kind: ContractKind, document: &Value) -> Option<Violation> {
    let expected = kind.expected_version()?;
    let obj = document.as_object()?;
    let found = obj.get("schemaVersion").or_else(|| obj.get("schema_version"))?;
    if found.as_str() == Some(expected) {
        return None;
    }
    Some(Violation::new(
        "/schemaVersion",
        ViolationKind::LiteralMismatch,
        format!("unsupported {kind} schema version {found}: expected {expected:?}"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_observed_version_either_spelling() {
        assert_eq!(observed_schema_version(&json!({"schemaVersion": "x"})).as_deref(), Some("x"));
        assert_eq!(observed_schema_version(&json!({"schema_version": "y"})).as_deref(), Some("y"));
        assert_eq!(observed_schema_version(&json!({"schemaVersion": 2})), None);
        assert_eq!(observed_schema_version(&json!("etl-job@v1")), None);
    }

    #[test]
    fn test_version_gate() {
        assert!(version_gate(ContractKind::JobRequest, &json!({"schemaVersion": "etl-job@v1"})).is_none());
        assert!(version_gate(ContractKind::JobRequest, &json!({})).is_none());
        let v = version_gate(ContractKind::JobRequest, &json!({"schemaVersion": "etl-job@v2"})).unwrap();
        assert_eq!(v.kind, ViolationKind::LiteralMismatch);
        assert!(version_gate(ContractKind::JobResult, &json!({"schemaVersion": 1})).is_some());
        assert!(version_gate(ContractKind::Manifest, &json!({"schemaVersion": "anything"})).is_none());
    }

    #[test]
    fn test_parse_json_reports_position() {
        let err = parse_json(ContractKind::JobResult, "{\n  \"a\": }").unwrap_err();
        match err {
            ContractError::MalformedJson { line, .. } => assert_eq!(line, 2),
            other => panic!("expected MalformedJson, got {other}"),
        }
    }
}
