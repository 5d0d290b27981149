//! # etlc-schema: ETL Contract Validation
//!
//! Validates the three messages exchanged between the ETL orchestrator and
//! its pipeline workers and turns them into typed records:
//!
//! - **Job request** (`etl-job@v1`): what to extract, which models to use,
//!   where to write.
//! - **Job result** (`etl-result@v1`): what a run produced and which
//!   per-document errors occurred.
//! - **Manifest**: provenance of a completed run (input fingerprints,
//!   component versions, timestamps, output listing).
//!
//! ## Validation (`validate`)
//!
//! Every entry point accepts JSON text or an already parsed
//! [`serde_json::Value`]. A rejected payload yields
//! [`ContractError::ContractViolation`] with *every* violation found, each
//! located by a JSON Pointer. Structural checks run against the published
//! schemas in `schemas/`, which are embedded at compile time.
//!
//! ## Loading (`load`)
//!
//! [`load_job_request`], [`load_job_result`] and [`load_manifest`] read a
//! file and validate it. A missing file is [`ContractError::NotFound`] and
//! is reported before any read attempt.
//!
//! ## Field Names
//!
//! Wire documents use camelCase. The snake_case spellings are accepted on
//! input and rewritten before validation; serialization always emits the
//! camelCase names.
//!
//! ## Crate Policy
//!
//! - Depends only on `etlc-core` internally.
//! - Validation is a trust boundary: the only conversions are the lax
//!   count and flag primitives described in [`aliases`]; nothing else is
//!   coerced, defaulted or repaired.
//! - Validation is pure and re-entrant; no global state is touched.

pub mod aliases;
pub mod config;
pub mod contract;
pub mod error;
pub mod load;
pub mod manifest;
pub mod request;
pub mod result;
mod rules;
pub mod structural;
pub mod validate;
pub mod violation;

pub use config::{ConfigError, UnknownFieldPolicy, ValidationConfig};
pub use contract::{Contract, ContractKind, JOB_REQUEST_VERSION, JOB_RESULT_VERSION};
pub use error::ContractError;
pub use load::{
    load_contract, load_job_request, load_job_request_from_json, load_job_request_with,
    load_job_result, load_job_result_from_json, load_job_result_with, load_manifest,
    load_manifest_from_json, load_manifest_with, read_document,
};
pub use manifest::{DocumentFingerprint, EtlManifest, ManifestProvenance};
pub use request::{
    EtlJobArtifacts, EtlJobInput, EtlJobModels, EtlJobOutput, EtlJobRequest, ExtensionFlags,
    GeoSource, InputSource, JobRequestVersion, OutputDestination, OutputFormat,
};
pub use result::{EtlJobError, EtlJobOutputs, EtlJobResult, EtlJobStats, JobResultVersion, JobStatus};
pub use structural::build_validator;
pub use validate::{
    validate_contract, validate_job_request, validate_job_request_with, validate_job_result,
    validate_job_result_with, validate_manifest, validate_manifest_with, RawPayload,
};
pub use violation::{ContractViolations, Violation, ViolationKind};
