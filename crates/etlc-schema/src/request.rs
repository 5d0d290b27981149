//! # ETL Job Request
//!
//! The unit of work the orchestrator hands to an ETL worker. Two shapes
//! are legal for the input (explicit document ids or a selection query) and
//! two for the output (a directory or an artifact store prefix); every
//! other combination is rejected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use etlc_core::{Fingerprint, IsoDateTime, RunId};

use crate::config::ValidationConfig;
use crate::contract::{Contract, ContractKind, JOB_REQUEST_VERSION};
use crate::rules;
use crate::violation::ContractViolations;

/// Schema version tag of a job request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JobRequestVersion {
    #[default]
    #[serde(rename = "etl-job@v1")]
    V1,
}

impl JobRequestVersion {
    /// The tag as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => JOB_REQUEST_VERSION,
        }
    }
}

/// Where geographic enrichment data is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoSource {
    Mongo,
    Postgis,
    Both,
}

/// Serialization format of produced triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Turtle,
}

/// Which ontology extensions to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtensionFlags {
    pub geo: bool,
    pub legal: bool,
    pub web: bool,
}

/// Which documents to process and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtlJobInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Map<String, Value>>,
    pub include_chunks: bool,
    pub include_extensions: ExtensionFlags,
    pub geo_source: GeoSource,
}

/// The selected input of a validated request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputSource<'a> {
    /// Process exactly these documents, in order.
    Documents(&'a [String]),
    /// Process whatever this query selects.
    Query(&'a Map<String, Value>),
}

impl EtlJobInput {
    fn has_document_ids(&self) -> bool {
        self.document_ids.as_ref().is_some_and(|ids| !ids.is_empty())
    }

    fn has_query(&self) -> bool {
        self.query.as_ref().is_some_and(|q| !q.is_empty())
    }

    /// The input source, or `None` if the exactly-one-of rule is broken.
    pub fn source(&self) -> Option<InputSource<'_>> {
        match (&self.document_ids, &self.query) {
            (Some(ids), _) if self.has_document_ids() && !self.has_query() => {
                Some(InputSource::Documents(ids))
            }
            (_, Some(query)) if self.has_query() && !self.has_document_ids() => {
                Some(InputSource::Query(query))
            }
            _ => None,
        }
    }
}

/// Content-addressed artifacts the job may reuse.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtlJobArtifacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_refs: Option<Vec<Fingerprint>>,
}

/// Model and mapping versions, recorded for reproducibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtlJobModels {
    pub nlp_model_id: String,
    pub rdf_mapping_version: String,
}

/// Where and how results are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtlJobOutput {
    pub format: OutputFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_store_prefix: Option<String>,
    pub manifest_name: String,
}

/// The selected destination of a validated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputDestination<'a> {
    /// A filesystem directory.
    Directory(&'a str),
    /// A key prefix in the artifact store.
    ArtifactStore(&'a str),
}

impl EtlJobOutput {
    /// The destination, or `None` if the exactly-one-of rule is broken.
    pub fn destination(&self) -> Option<OutputDestination<'_>> {
        match (&self.output_dir, &self.artifact_store_prefix) {
            (Some(dir), None) => Some(OutputDestination::Directory(dir)),
            (None, Some(prefix)) => Some(OutputDestination::ArtifactStore(prefix)),
            _ => None,
        }
    }
}

/// ETL job request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtlJobRequest {
    pub schema_version: JobRequestVersion,
    pub run_id: RunId,
    pub created_at: IsoDateTime,
    pub input: EtlJobInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<EtlJobArtifacts>,
    pub models: EtlJobModels,
    pub output: EtlJobOutput,
}

impl EtlJobRequest {
    /// Artifact references, empty when none were given.
    pub fn artifact_refs(&self) -> &[Fingerprint] {
        self.artifacts
            .as_ref()
            .and_then(|a| a.artifact_refs.as_deref())
            .unwrap_or_default()
    }
}

impl Contract for EtlJobRequest {
    const KIND: ContractKind = ContractKind::JobRequest;
    const DATETIME_FIELDS: &'static [&'static str] = &["/createdAt"];

    fn check_rules(&self, _config: &ValidationConfig, violations: &mut ContractViolations) {
        rules::exactly_one(
            "/input",
            ("documentIds", self.input.has_document_ids()),
            ("query", self.input.has_query()),
            violations,
        );
        rules::exactly_one(
            "/output",
            ("outputDir", self.output.output_dir.is_some()),
            ("artifactStorePrefix", self.output.artifact_store_prefix.is_some()),
            violations,
        );
    }
}
