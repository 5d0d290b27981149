//! # ETL Job Result
//!
//! The outcome a worker reports for a job. A result carries the run id of
//! the request it answers; matching the two is the caller's job, helped by
//! [`EtlJobResult::correlates_with`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use etlc_core::RunId;

use crate::config::ValidationConfig;
use crate::contract::{Contract, ContractKind, JOB_RESULT_VERSION};
use crate::request::EtlJobRequest;
use crate::violation::ContractViolations;

/// Schema version tag of a job result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JobResultVersion {
    #[default]
    #[serde(rename = "etl-result@v1")]
    V1,
}

impl JobResultVersion {
    /// The tag as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => JOB_RESULT_VERSION,
        }
    }
}

/// Final state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Succeeded,
    Failed,
    Partial,
}

/// Counters reported by a job. Shared with the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtlJobStats {
    pub documents_processed: u64,
    pub triples_emitted: u64,
    pub files_written: u64,
}

/// References to the files a job produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtlJobOutputs {
    pub turtle_files: Vec<String>,
    pub manifest: String,
}

/// Structured error information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtlJobError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

/// ETL job result payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtlJobResult {
    pub schema_version: JobResultVersion,
    pub run_id: RunId,
    pub status: JobStatus,
    pub stats: EtlJobStats,
    pub outputs: EtlJobOutputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<EtlJobError>>,
}

impl EtlJobResult {
    /// Returns true if this result answers `request`.
    pub fn correlates_with(&self, request: &EtlJobRequest) -> bool {
        self.run_id == request.run_id
    }

    /// Reported errors, empty when none were given.
    pub fn errors(&self) -> &[EtlJobError] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// Errors attributed to one document.
    pub fn errors_for_document<'a>(
        &'a self,
        document_id: &'a str,
    ) -> impl Iterator<Item = &'a EtlJobError> + 'a {
        self.errors()
            .iter()
            .filter(move |e| e.document_id.as_deref() == Some(document_id))
    }
}

impl Contract for EtlJobResult {
    const KIND: ContractKind = ContractKind::JobResult;

    fn check_rules(&self, _config: &ValidationConfig, _violations: &mut ContractViolations) {}
}
