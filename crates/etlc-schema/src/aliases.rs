//! # Wire Aliases
//!
//! Every record field has a wire name (`documentIds`) and an internal name
//! (`document_ids`). Both are accepted on input. This module holds the one
//! declarative table of those pairs and rewrites incoming documents to wire
//! names before any other check runs, so the JSON Schemas and the typed
//! records only ever see one spelling.
//!
//! When a document carries both spellings of a field, the wire name wins
//! and the internal one is discarded.
//!
//! Free-form mappings (`query`, error `context`, version maps, manifest
//! `outputs`) are not records; their keys are never rewritten or checked.
//!
//! ## Lax Primitives
//!
//! Counts and boolean flags are converted the way producers' lax decoders
//! do before the structural pass sees them:
//!
//! - Count: whole-number floats (`2.0`), integer strings (`"2"`) and booleans
//!   become integers. Negative results stay negative and fail the range
//!   check at their own path.
//! - Flag: `0`/`1` and the strings `true`/`false`, `t`/`f`, `yes`/`no`,
//!   `y`/`n`, `on`/`off`, `1`/`0` (any case) become booleans.
//!
//! Anything else is left untouched for the structural pass to report.

use serde_json::{Map, Value};

use crate::config::UnknownFieldPolicy;
use crate::violation::{pointer_push, ContractViolations, Violation, ViolationKind};

/// How a field's value is treated during normalization.
#[derive(Debug)]
pub enum FieldShape {
    /// Copied verbatim.
    Value,
    /// A non-negative integer counter, converted leniently.
    Count,
    /// A boolean flag, converted leniently.
    Flag,
    /// A nested record.
    Record(&'static RecordSpec),
    /// A sequence of nested records.
    RecordList(&'static RecordSpec),
}

/// One field of a record.
#[derive(Debug)]
pub struct FieldSpec {
    /// Name on the wire (what serialization emits).
    pub wire: &'static str,
    /// Internal name, also accepted on input.
    pub internal: &'static str,
    /// Nested structure, if any.
    pub shape: FieldShape,
}

/// The field table of one record type.
#[derive(Debug)]
pub struct RecordSpec {
    /// Record name used in messages.
    pub name: &'static str,
    /// Every field the record defines.
    pub fields: &'static [FieldSpec],
}

impl RecordSpec {
    /// Returns true if `key` is either spelling of one of the fields.
    pub fn defines(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.wire == key || f.internal == key)
    }
}

const fn field(wire: &'static str, internal: &'static str) -> FieldSpec {
    FieldSpec {
        wire,
        internal,
        shape: FieldShape::Value,
    }
}

const fn count(wire: &'static str, internal: &'static str) -> FieldSpec {
    FieldSpec {
        wire,
        internal,
        shape: FieldShape::Count,
    }
}

const fn flag(wire: &'static str, internal: &'static str) -> FieldSpec {
    FieldSpec {
        wire,
        internal,
        shape: FieldShape::Flag,
    }
}

const fn record(wire: &'static str, internal: &'static str, spec: &'static RecordSpec) -> FieldSpec {
    FieldSpec {
        wire,
        internal,
        shape: FieldShape::Record(spec),
    }
}

const fn record_list(
    wire: &'static str,
    internal: &'static str,
    spec: &'static RecordSpec,
) -> FieldSpec {
    FieldSpec {
        wire,
        internal,
        shape: FieldShape::RecordList(spec),
    }
}

// ---------------------------------------------------------------------------
// Job request
// ---------------------------------------------------------------------------

pub static EXTENSION_FLAGS: RecordSpec = RecordSpec {
    name: "ExtensionFlags",
    fields: &[flag("geo", "geo"), flag("legal", "legal"), flag("web", "web")],
};

pub static JOB_INPUT: RecordSpec = RecordSpec {
    name: "EtlJobInput",
    fields: &[
        field("documentIds", "document_ids"),
        field("query", "query"),
        flag("includeChunks", "include_chunks"),
        record("includeExtensions", "include_extensions", &EXTENSION_FLAGS),
        field("geoSource", "geo_source"),
    ],
};

pub static JOB_ARTIFACTS: RecordSpec = RecordSpec {
    name: "EtlJobArtifacts",
    fields: &[field("artifactRefs", "artifact_refs")],
};

pub static JOB_MODELS: RecordSpec = RecordSpec {
    name: "EtlJobModels",
    fields: &[
        field("nlpModelId", "nlp_model_id"),
        field("rdfMappingVersion", "rdf_mapping_version"),
    ],
};

pub static JOB_OUTPUT: RecordSpec = RecordSpec {
    name: "EtlJobOutput",
    fields: &[
        field("format", "format"),
        field("outputDir", "output_dir"),
        field("artifactStorePrefix", "artifact_store_prefix"),
        field("manifestName", "manifest_name"),
    ],
};

pub static JOB_REQUEST: RecordSpec = RecordSpec {
    name: "EtlJobRequest",
    fields: &[
        field("schemaVersion", "schema_version"),
        field("runId", "run_id"),
        field("createdAt", "created_at"),
        record("input", "input", &JOB_INPUT),
        record("artifacts", "artifacts", &JOB_ARTIFACTS),
        record("models", "models", &JOB_MODELS),
        record("output", "output", &JOB_OUTPUT),
    ],
};

// ---------------------------------------------------------------------------
// Job result
// ---------------------------------------------------------------------------

pub static JOB_STATS: RecordSpec = RecordSpec {
    name: "EtlJobStats",
    fields: &[
        count("documentsProcessed", "documents_processed"),
        count("triplesEmitted", "triples_emitted"),
        count("filesWritten", "files_written"),
    ],
};

pub static JOB_OUTPUTS: RecordSpec = RecordSpec {
    name: "EtlJobOutputs",
    fields: &[field("turtleFiles", "turtle_files"), field("manifest", "manifest")],
};

pub static JOB_ERROR: RecordSpec = RecordSpec {
    name: "EtlJobError",
    fields: &[
        field("code", "code"),
        field("message", "message"),
        field("documentId", "document_id"),
        field("context", "context"),
    ],
};

pub static JOB_RESULT: RecordSpec = RecordSpec {
    name: "EtlJobResult",
    fields: &[
        field("schemaVersion", "schema_version"),
        field("runId", "run_id"),
        field("status", "status"),
        record("stats", "stats", &JOB_STATS),
        record("outputs", "outputs", &JOB_OUTPUTS),
        record_list("errors", "errors", &JOB_ERROR),
    ],
};

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

pub static DOCUMENT_FINGERPRINT: RecordSpec = RecordSpec {
    name: "DocumentFingerprint",
    fields: &[
        field("documentId", "document_id"),
        field("contentFingerprint", "content_fingerprint"),
    ],
};

pub static MANIFEST_PROVENANCE: RecordSpec = RecordSpec {
    name: "ManifestProvenance",
    fields: &[
        record_list("inputFingerprints", "input_fingerprints", &DOCUMENT_FINGERPRINT),
        field("parserVersions", "parser_versions"),
        field("mapperVersions", "mapper_versions"),
        field("modelVersions", "model_versions"),
        field("rdfMappingVersion", "rdf_mapping_version"),
    ],
};

pub static MANIFEST: RecordSpec = RecordSpec {
    name: "EtlManifest",
    fields: &[
        field("schemaVersion", "schema_version"),
        field("runId", "run_id"),
        field("createdAt", "created_at"),
        field("completedAt", "completed_at"),
        record("provenance", "provenance", &MANIFEST_PROVENANCE),
        field("outputs", "outputs"),
        record("stats", "stats", &JOB_STATS),
    ],
};

/// Rewrite a document to wire names according to `spec`.
///
/// Values that are not objects where a record is expected are returned
/// unchanged; the structural pass reports them.
pub(crate) fn normalize(
    document: &Value,
    spec: &RecordSpec,
    policy: UnknownFieldPolicy,
    violations: &mut ContractViolations,
) -> Value {
    normalize_at(document, spec, "", policy, violations)
}

fn normalize_at(
    value: &Value,
    spec: &RecordSpec,
    path: &str,
    policy: UnknownFieldPolicy,
    violations: &mut ContractViolations,
) -> Value {
    let Value::Object(obj) = value else {
        return value.clone();
    };

    let mut out = Map::new();
    for field in spec.fields {
        let chosen = match (obj.get(field.wire), obj.get(field.internal)) {
            (Some(wire), Some(_)) if field.wire != field.internal => {
                tracing::trace!(
                    record = spec.name,
                    field = field.wire,
                    "both spellings present; keeping wire name"
                );
                wire
            }
            (Some(wire), _) => wire,
            (None, Some(internal)) => internal,
            (None, None) => continue,
        };

        let child = pointer_push(path, field.wire);
        let normalized = match field.shape {
            FieldShape::Value => chosen.clone(),
            FieldShape::Count => lax_count(chosen),
            FieldShape::Flag => lax_flag(chosen),
            FieldShape::Record(inner) => normalize_at(chosen, inner, &child, policy, violations),
            FieldShape::RecordList(inner) => match chosen {
                Value::Array(items) => Value::Array(
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| {
                            let item_path = pointer_push(&child, &i.to_string());
                            normalize_at(item, inner, &item_path, policy, violations)
                        })
                        .collect(),
                ),
                other => other.clone(),
            },
        };
        out.insert(field.wire.to_string(), normalized);
    }

    for (key, extra) in obj {
        if spec.defines(key) {
            continue;
        }
        match policy {
            UnknownFieldPolicy::Ignore => {
                out.insert(key.clone(), extra.clone());
            }
            UnknownFieldPolicy::Reject => violations.push(Violation::new(
                pointer_push(path, key),
                ViolationKind::UnknownField,
                format!("unknown field {key:?} in {}", spec.name),
            )),
        }
    }

    Value::Object(out)
}

/// Exclusive upper bound of a `u64` counter, as a float.
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

fn lax_count(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && (0.0..U64_BOUND).contains(&f) => Value::from(f as u64),
            Some(f) if f.fract() == 0.0 && f < 0.0 && f >= i64::MIN as f64 => Value::from(f as i64),
            _ => value.clone(),
        },
        Value::String(s) => {
            let t = s.trim();
            if let Ok(n) = t.parse::<u64>() {
                Value::from(n)
            } else if let Ok(n) = t.parse::<i64>() {
                Value::from(n)
            } else {
                value.clone()
            }
        }
        Value::Bool(b) => Value::from(u64::from(*b)),
        _ => value.clone(),
    }
}

fn lax_flag(value: &Value) -> Value {
    let coerced = match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 => Some(false),
            Some(f) if f == 1.0 => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
            "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    };
    coerced.map_or_else(|| value.clone(), Value::Bool)
}
