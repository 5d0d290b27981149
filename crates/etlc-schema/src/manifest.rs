//! # ETL Manifest
//!
//! Provenance record for the artifacts of one run: which inputs were read
//! (by content fingerprint), which parser, mapper and model versions ran,
//! and what was produced.
//!
//! The manifest's `schemaVersion` is an open string, and `outputs` is kept
//! as a free-form mapping. Use [`EtlManifest::turtle_files`] and
//! [`EtlManifest::manifest_file`] to read the conventional keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use etlc_core::{Fingerprint, IsoDateTime, RunId};

use crate::config::ValidationConfig;
use crate::contract::{Contract, ContractKind};
use crate::result::EtlJobStats;
use crate::rules;
use crate::violation::ContractViolations;

/// Fingerprint of one input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFingerprint {
    pub document_id: String,
    pub content_fingerprint: Fingerprint,
}

/// Component versions and input fingerprints of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestProvenance {
    pub input_fingerprints: Vec<DocumentFingerprint>,
    pub parser_versions: BTreeMap<String, String>,
    pub mapper_versions: BTreeMap<String, String>,
    pub model_versions: BTreeMap<String, String>,
    pub rdf_mapping_version: String,
}

/// ETL manifest payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtlManifest {
    pub schema_version: String,
    pub run_id: RunId,
    pub created_at: IsoDateTime,
    pub completed_at: IsoDateTime,
    pub provenance: ManifestProvenance,
    pub outputs: Map<String, Value>,
    pub stats: EtlJobStats,
}

impl EtlManifest {
    /// `outputs.turtleFiles`, if present and a list of strings.
    pub fn turtle_files(&self) -> Option<Vec<&str>> {
        self.outputs
            .get("turtleFiles")?
            .as_array()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    /// `outputs.manifest`, if present and a string.
    pub fn manifest_file(&self) -> Option<&str> {
        self.outputs.get("manifest")?.as_str()
    }

    /// The recorded fingerprint of a document, if it was an input.
    pub fn fingerprint_of(&self, document_id: &str) -> Option<&Fingerprint> {
        self.provenance
            .input_fingerprints
            .iter()
            .find(|f| f.document_id == document_id)
            .map(|f| &f.content_fingerprint)
    }
}

impl Contract for EtlManifest {
    const KIND: ContractKind = ContractKind::Manifest;
    const DATETIME_FIELDS: &'static [&'static str] = &["/createdAt", "/completedAt"];

    fn check_rules(&self, config: &ValidationConfig, violations: &mut ContractViolations) {
        if config.enforce_chronology {
            rules::check_chronology(&self.created_at, &self.completed_at, "/completedAt", violations);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest(outputs: Value) -> EtlManifest {
        EtlManifest {
            schema_version: "etl-manifest@v1".into(),
            run_id: RunId::new("r1").unwrap(),
            created_at: IsoDateTime::parse("2024-01-01T00:00:00Z").unwrap(),
            completed_at: IsoDateTime::parse("2024-01-01T00:05:00Z").unwrap(),
            provenance: ManifestProvenance {
                input_fingerprints: vec![DocumentFingerprint {
                    document_id: "d1".into(),
                    content_fingerprint: Fingerprint::compute(b"d1"),
                }],
                parser_versions: BTreeMap::new(),
                mapper_versions: BTreeMap::new(),
                model_versions: BTreeMap::new(),
                rdf_mapping_version: "v1".into(),
            },
            outputs: outputs.as_object().cloned().unwrap_or_default(),
            stats: EtlJobStats::default(),
        }
    }

    #[test]
    fn test_output_accessors() {
        let m = manifest(json!({"turtleFiles": ["a.ttl", "b.ttl"], "manifest": "manifest.json"}));
        assert_eq!(m.turtle_files(), Some(vec!["a.ttl", "b.ttl"]));
        assert_eq!(m.manifest_file(), Some("manifest.json"));
    }

    #[test]
    fn test_output_accessors_tolerate_loose_shapes() {
        let m = manifest(json!({"turtleFiles": ["a.ttl", 3], "manifest": {"path": "m"}}));
        assert_eq!(m.turtle_files(), None);
        assert_eq!(m.manifest_file(), None);
        assert_eq!(manifest(json!({})).turtle_files(), None);
    }

    #[test]
    fn test_fingerprint_of() {
        let m = manifest(json!({}));
        assert!(m.fingerprint_of("d1").unwrap().verify(b"d1"));
        assert!(m.fingerprint_of("d2").is_none());
    }

    #[test]
    fn test_chronology_only_when_enabled() {
        let mut m = manifest(json!({}));
        m.completed_at = IsoDateTime::parse("2023-12-31T23:59:59Z").unwrap();

        let mut v = ContractViolations::default();
        m.check_rules(&ValidationConfig::default(), &mut v);
        assert!(v.is_empty());

        m.check_rules(&ValidationConfig::strict(), &mut v);
        assert_eq!(v.len(), 1);
    }
}
