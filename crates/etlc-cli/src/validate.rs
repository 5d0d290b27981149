//! # Validate Subcommand
//!
//! Validates contract documents on disk and reports one line per file, or a
//! JSON report with `--json`.
//!
//! Configuration starts from the environment (`ETLC_UNKNOWN_FIELDS`,
//! `ETLC_ENFORCE_CHRONOLOGY`); command-line flags can only tighten it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use etlc_schema::{
    load_contract, Contract, ContractError, ContractKind, ContractViolations, EtlJobRequest,
    EtlJobResult, EtlManifest, UnknownFieldPolicy, ValidationConfig,
};

/// Arguments for the `etlc validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Contract the files must satisfy (request, result or manifest).
    #[arg(value_name = "KIND")]
    pub kind: ContractKind,

    /// Files to validate.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Print a JSON report instead of PASS/FAIL lines.
    #[arg(long)]
    pub json: bool,

    /// Reject fields the contract does not define.
    #[arg(long)]
    pub reject_unknown_fields: bool,

    /// Require manifest completedAt to be no earlier than createdAt.
    #[arg(long)]
    pub enforce_chronology: bool,
}

impl ValidateArgs {
    fn config(&self) -> Result<ValidationConfig> {
        let mut config =
            ValidationConfig::from_env().context("invalid validation settings in environment")?;
        if self.reject_unknown_fields {
            config.unknown_fields = UnknownFieldPolicy::Reject;
        }
        if self.enforce_chronology {
            config.enforce_chronology = true;
        }
        Ok(config)
    }
}

/// Outcome of validating one file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "ContractViolations::is_empty")]
    pub violations: ContractViolations,
}

/// Per-file verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// The document satisfies the contract.
    Pass,
    /// The document is malformed JSON or breaks the contract.
    Fail,
    /// The file could not be found or read.
    Error,
}

impl FileReport {
    fn from_outcome(path: &Path, outcome: Result<(), ContractError>) -> Self {
        let mut report = Self {
            path: path.to_path_buf(),
            status: FileStatus::Pass,
            schema_version: None,
            error: None,
            violations: ContractViolations::default(),
        };
        let Err(err) = outcome else {
            return report;
        };
        report.status = match &err {
            ContractError::NotFound { .. }
            | ContractError::Read { .. }
            | ContractError::SchemaBuild { .. } => FileStatus::Error,
            ContractError::MalformedJson { .. } | ContractError::ContractViolation { .. } => {
                FileStatus::Fail
            }
        };
        match err {
            ContractError::ContractViolation {
                schema_version,
                violations,
                ..
            } => {
                report.schema_version = schema_version;
                report.violations = violations;
            }
            other => report.error = Some(other.to_string()),
        }
        report
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure, 2 on operational error.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let config = args.config()?;
    tracing::info!(
        contract = %args.kind,
        files = args.paths.len(),
        ?config,
        "validating contract documents"
    );

    let reports: Vec<FileReport> = args
        .paths
        .iter()
        .map(|path| FileReport::from_outcome(path, validate_file(args.kind, path, &config)))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_reports(args.kind, &reports);
    }

    Ok(exit_code(&reports))
}

/// Validate one file against `kind`, discarding the typed record.
pub fn validate_file(
    kind: ContractKind,
    path: &Path,
    config: &ValidationConfig,
) -> Result<(), ContractError> {
    fn check<C: Contract>(path: &Path, config: &ValidationConfig) -> Result<(), ContractError> {
        load_contract::<C>(path, config).map(drop)
    }
    match kind {
        ContractKind::JobRequest => check::<EtlJobRequest>(path, config),
        ContractKind::JobResult => check::<EtlJobResult>(path, config),
        ContractKind::Manifest => check::<EtlManifest>(path, config),
    }
}

fn print_reports(kind: ContractKind, reports: &[FileReport]) {
    let passed = reports.iter().filter(|r| r.status == FileStatus::Pass).count();
    for report in reports {
        match report.status {
            FileStatus::Pass => println!("  PASS: {}", report.path.display()),
            FileStatus::Fail | FileStatus::Error => {
                let label = if report.status == FileStatus::Fail { "FAIL" } else { "ERROR" };
                match &report.error {
                    Some(error) => println!("  {label}: {}: {error}", report.path.display()),
                    None => {
                        println!("  {label}: {}", report.path.display());
                        for violation in &report.violations {
                            println!("  {violation}");
                        }
                    }
                }
            }
        }
    }
    println!("{}: {passed}/{} passed", capitalize(kind.name()), reports.len());
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn exit_code(reports: &[FileReport]) -> u8 {
    if reports.iter().any(|r| r.status == FileStatus::Error) {
        crate::EXIT_OPERATIONAL
    } else if reports.iter().any(|r| r.status == FileStatus::Fail) {
        crate::EXIT_REJECTED
    } else {
        crate::EXIT_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = r#"{
        "schemaVersion": "etl-job@v1",
        "runId": "r1",
        "createdAt": "2024-01-01T00:00:00Z",
        "input": {
            "documentIds": ["d1"],
            "includeChunks": true,
            "includeExtensions": {"geo": false, "legal": false, "web": false},
            "geoSource": "mongo"
        },
        "models": {"nlpModelId": "m1", "rdfMappingVersion": "v1"},
        "output": {"format": "turtle", "manifestName": "man1", "outputDir": "/tmp/out"}
    }"#;

    fn args(kind: ContractKind, paths: Vec<PathBuf>) -> ValidateArgs {
        ValidateArgs {
            kind,
            paths,
            json: true,
            reject_unknown_fields: false,
            enforce_chronology: false,
        }
    }

    #[test]
    fn valid_request_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r1.json");
        std::fs::write(&path, REQUEST).unwrap();
        assert_eq!(run_validate(&args(ContractKind::JobRequest, vec![path])).unwrap(), 0);
    }

    #[test]
    fn rejected_document_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("r1.json");
        let bad = dir.path().join("r2.json");
        std::fs::write(&good, REQUEST).unwrap();
        std::fs::write(&bad, REQUEST.replace("etl-job@v1", "etl-job@v2")).unwrap();
        assert_eq!(run_validate(&args(ContractKind::JobRequest, vec![good, bad])).unwrap(), 1);
    }

    #[test]
    fn missing_file_exits_two() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not valid").unwrap();
        let missing = dir.path().join("absent.json");
        assert_eq!(run_validate(&args(ContractKind::Manifest, vec![bad, missing])).unwrap(), 2);
    }

    #[test]
    fn reject_flag_tightens_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r1.json");
        std::fs::write(&path, REQUEST.replacen("\"runId\"", "\"priority\": 1, \"runId\"", 1)).unwrap();
        let mut a = args(ContractKind::JobRequest, vec![path]);
        assert_eq!(run_validate(&a).unwrap(), 0);
        a.reject_unknown_fields = true;
        assert_eq!(run_validate(&a).unwrap(), 1);
    }

    #[test]
    fn report_carries_violations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r1.json");
        std::fs::write(&path, REQUEST.replace("etl-job@v1", "etl-job@v9")).unwrap();
        let outcome = validate_file(ContractKind::JobRequest, &path, &ValidationConfig::default());
        let report = FileReport::from_outcome(&path, outcome);
        assert_eq!(report.status, FileStatus::Fail);
        assert_eq!(report.schema_version.as_deref(), Some("etl-job@v9"));
        assert_eq!(report.violations.len(), 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "fail");
        assert_eq!(json["violations"][0]["path"], "/schemaVersion");
        assert_eq!(json["violations"][0]["kind"], "literal_mismatch");
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("ETL job request"), "ETL job request");
        assert_eq!(capitalize("manifest"), "Manifest");
    }
}
