//! File loaders.

use std::fs;

use etlc_schema::{
    load_job_request, load_job_result, load_job_result_from_json, load_manifest,
    load_manifest_with, ContractKind, ValidationConfig,
};

const RESULT: &str = r#"{
  "schemaVersion": "etl-result@v1",
  "runId": "r1",
  "status": "succeeded",
  "stats": {"documentsProcessed": 1, "triplesEmitted": 3, "filesWritten": 1},
  "outputs": {"turtleFiles": ["r1.ttl"], "manifest": "manifest.json"}
}"#;

#[test]
fn missing_file_is_not_found_for_every_contract() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let errors = [
        load_job_request(&path).map(drop).unwrap_err(),
        load_job_result(&path).map(drop).unwrap_err(),
        load_manifest(&path).map(drop).unwrap_err(),
    ];
    for (err, kind) in errors.iter().zip(ContractKind::ALL) {
        assert!(err.is_not_found(), "{kind}: {err}");
        assert_eq!(err.contract(), kind);
    }
}

#[test]
fn malformed_file_is_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.json");
    fs::write(&path, "{not valid").unwrap();
    let err = load_job_request(&path).unwrap_err();
    assert!(err.is_malformed_json());
}

#[test]
fn valid_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");
    fs::write(&path, RESULT).unwrap();
    let from_file = load_job_result(&path).unwrap();
    assert_eq!(from_file, load_job_result_from_json(RESULT).unwrap());
}

#[test]
fn wrong_contract_file_is_violation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");
    fs::write(&path, RESULT).unwrap();
    let err = load_manifest(&path).unwrap_err();
    assert!(err.is_contract_violation());
    assert_eq!(err.contract(), ContractKind::Manifest);
    assert_eq!(err.schema_version(), Some("etl-result@v1"));
}

#[test]
fn directory_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_manifest_with(dir.path(), &ValidationConfig::default()).unwrap_err();
    assert!(!err.is_not_found());
    assert!(!err.is_contract_violation());
}
