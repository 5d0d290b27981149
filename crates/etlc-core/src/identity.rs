//! # Run Identity
//!
//! `RunId` names one execution of an ETL job. The orchestrator assigns it
//! and guarantees uniqueness; this layer only guarantees it is non-empty.
//! A job result carries the run id of the request it answers, so the type
//! is shared by every contract.

use serde::{Deserialize, Serialize};

use crate::error::EtlcError;

/// Identifier of a single ETL job execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RunId(String);

impl RunId {
    /// Create a run id, rejecting the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`EtlcError::EmptyIdentifier`] if `value` is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, EtlcError> {
        let s = value.into();
        if s.is_empty() {
            return Err(EtlcError::EmptyIdentifier { field: "runId" });
        }
        Ok(Self(s))
    }

    /// Access the run id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RunId {
    type Error = EtlcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RunId> for String {
    fn from(value: RunId) -> Self {
        value.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
