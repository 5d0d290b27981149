//! # Contract Loaders
//!
//! Read a contract document from disk or from a JSON string and validate it.
//! Existence is checked before reading so a missing file is reported as
//! [`ContractError::NotFound`] rather than as a read failure.

use std::path::Path;

use crate::config::ValidationConfig;
use crate::contract::{Contract, ContractKind};
use crate::error::ContractError;
use crate::manifest::EtlManifest;
use crate::request::EtlJobRequest;
use crate::result::EtlJobResult;
use crate::validate::validate_contract;

/// Read the text of a `kind` document at `path`.
pub fn read_document(kind: ContractKind, path: &Path) -> Result<String, ContractError> {
    if !path.exists() {
        return Err(ContractError::NotFound {
            contract: kind,
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ContractError::NotFound {
                contract: kind,
                path: path.to_path_buf(),
            }
        } else {
            ContractError::Read {
                contract: kind,
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Load and validate a `C` document from `path`.
pub fn load_contract<C: Contract>(
    path: impl AsRef<Path>,
    config: &ValidationConfig,
) -> Result<C, ContractError> {
    let path = path.as_ref();
    tracing::debug!(contract = %C::KIND, path = %path.display(), "loading contract document");
    let text = read_document(C::KIND, path)?;
    validate_contract(text.as_str(), config)
}

/// Load an ETL job request from `path`.
pub fn load_job_request(path: impl AsRef<Path>) -> Result<EtlJobRequest, ContractError> {
    load_contract(path, &ValidationConfig::default())
}

/// Load an ETL job request from `path` with an explicit configuration.
pub fn load_job_request_with(
    path: impl AsRef<Path>,
    config: &ValidationConfig,
) -> Result<EtlJobRequest, ContractError> {
    load_contract(path, config)
}

/// Load an ETL job result from `path`.
pub fn load_job_result(path: impl AsRef<Path>) -> Result<EtlJobResult, ContractError> {
    load_contract(path, &ValidationConfig::default())
}

/// Load an ETL job result from `path` with an explicit configuration.
pub fn load_job_result_with(
    path: impl AsRef<Path>,
    config: &ValidationConfig,
) -> Result<EtlJobResult, ContractError> {
    load_contract(path, config)
}

/// Load an ETL manifest from `path`.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<EtlManifest, ContractError> {
    load_contract(path, &ValidationConfig::default())
}

/// Load an ETL manifest from `path` with an explicit configuration.
pub fn load_manifest_with(
    path: impl AsRef<Path>,
    config: &ValidationConfig,
) -> Result<EtlManifest, ContractError> {
    load_contract(path, config)
}

/// Parse and validate an ETL job request from a JSON string.
pub fn load_job_request_from_json(text: &str) -> Result<EtlJobRequest, ContractError> {
    validate_contract(text, &ValidationConfig::default())
}

/// Parse and validate an ETL job result from a JSON string.
pub fn load_job_result_from_json(text: &str) -> Result<EtlJobResult, ContractError> {
    validate_contract(text, &ValidationConfig::default())
}

/// Parse and validate an ETL manifest from a JSON string.
pub fn load_manifest_from_json(text: &str) -> Result<EtlManifest, ContractError> {
    validate_contract(text, &ValidationConfig::default())
}
