//! # Contract Kinds
//!
//! The three message kinds exchanged between the orchestrator and ETL
//! workers, their schema version tags, and the JSON Schema documents
//! published for other runtimes.
//!
//! Adding a contract version means adding a variant to the version enum of
//! the affected record; existing variants are never edited.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::aliases::{self, RecordSpec};
use crate::config::ValidationConfig;
use crate::violation::ContractViolations;

/// Schema version tag of the job request contract.
pub const JOB_REQUEST_VERSION: &str = "etl-job@v1";

/// Schema version tag of the job result contract.
pub const JOB_RESULT_VERSION: &str = "etl-result@v1";

/// Which contract a payload is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    /// [`crate::EtlJobRequest`].
    JobRequest,
    /// [`crate::EtlJobResult`].
    JobResult,
    /// [`crate::EtlManifest`].
    Manifest,
}

impl ContractKind {
    /// All contract kinds.
    pub const ALL: [ContractKind; 3] = [Self::JobRequest, Self::JobResult, Self::Manifest];

    /// Human-readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::JobRequest => "ETL job request",
            Self::JobResult => "ETL job result",
            Self::Manifest => "ETL manifest",
        }
    }

    /// The literal `schemaVersion` the contract requires. The manifest's
    /// version is an open string.
    pub fn expected_version(&self) -> Option<&'static str> {
        match self {
            Self::JobRequest => Some(JOB_REQUEST_VERSION),
            Self::JobResult => Some(JOB_RESULT_VERSION),
            Self::Manifest => None,
        }
    }

    /// File name of the published JSON Schema.
    pub fn schema_file(&self) -> &'static str {
        match self {
            Self::JobRequest => "etl-job.schema.json",
            Self::JobResult => "etl-result.schema.json",
            Self::Manifest => "etl-manifest.schema.json",
        }
    }

    /// The published JSON Schema (Draft 2020-12) as text.
    pub fn schema_source(&self) -> &'static str {
        match self {
            Self::JobRequest => include_str!("../schemas/etl-job.schema.json"),
            Self::JobResult => include_str!("../schemas/etl-result.schema.json"),
            Self::Manifest => include_str!("../schemas/etl-manifest.schema.json"),
        }
    }

    pub(crate) fn record(&self) -> &'static RecordSpec {
        match self {
            Self::JobRequest => &aliases::JOB_REQUEST,
            Self::JobResult => &aliases::JOB_RESULT,
            Self::Manifest => &aliases::MANIFEST,
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContractKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "request" | "job" | "etl-job" => Ok(Self::JobRequest),
            "result" | "etl-result" => Ok(Self::JobResult),
            "manifest" | "etl-manifest" => Ok(Self::Manifest),
            other => Err(format!(
                "unknown contract {other:?}: expected request, result or manifest"
            )),
        }
    }
}

/// A typed record that one contract validates into.
///
/// Implementors declare where their datetime fields live and which
/// cross-field rules apply once the record has been deserialized.
pub trait Contract: DeserializeOwned + Serialize {
    /// The contract this record belongs to.
    const KIND: ContractKind;

    /// JSON Pointers of ISO-8601 datetime fields in the wire document.
    const DATETIME_FIELDS: &'static [&'static str] = &[];

    /// Run the cross-field rules, recording every failure.
    fn check_rules(&self, config: &ValidationConfig, violations: &mut ContractViolations);
}
