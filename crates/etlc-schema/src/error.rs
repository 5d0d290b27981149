//! # Contract Errors
//!
//! The single error type returned by every validation entry point and
//! loader. Callers can tell apart a missing file, an unreadable file,
//! text that is not JSON, and JSON that breaks the contract. This layer
//! never recovers on the caller's behalf.

use std::path::PathBuf;

use thiserror::Error;

use crate::contract::ContractKind;
use crate::violation::ContractViolations;

/// Error returned when a payload cannot be accepted.
#[derive(Error, Debug)]
pub enum ContractError {
    /// The file to load does not exist. Reported before any read.
    #[error("{contract} file not found: {}", path.display())]
    NotFound {
        contract: ContractKind,
        path: PathBuf,
    },

    /// The file exists but could not be read as UTF-8 text.
    #[error("cannot read {contract} file {}: {source}", path.display())]
    Read {
        contract: ContractKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not syntactically valid JSON.
    #[error("invalid JSON for {contract}: {message}")]
    MalformedJson {
        contract: ContractKind,
        /// The parser's message.
        message: String,
        line: usize,
        column: usize,
    },

    /// The JSON parsed but broke the contract.
    #[error("{contract} validation failed ({} violation(s)):\n{violations}", violations.len())]
    ContractViolation {
        contract: ContractKind,
        /// `schemaVersion` as found in the input, when readable.
        schema_version: Option<String>,
        /// Every violation found.
        violations: ContractViolations,
    },

    /// An embedded schema failed to compile.
    #[error("schema build error for {contract}: {reason}")]
    SchemaBuild {
        contract: ContractKind,
        reason: String,
    },
}

impl ContractError {
    /// The contract the failing operation targeted.
    pub fn contract(&self) -> ContractKind {
        match self {
            Self::NotFound { contract, .. }
            | Self::Read { contract, .. }
            | Self::MalformedJson { contract, .. }
            | Self::ContractViolation { contract, .. }
            | Self::SchemaBuild { contract, .. } => *contract,
        }
    }

    /// The violations of a contract failure.
    pub fn violations(&self) -> Option<&ContractViolations> {
        match self {
            Self::ContractViolation { violations, .. } => Some(violations),
            _ => None,
        }
    }

    /// The `schemaVersion` observed in the rejected input.
    pub fn schema_version(&self) -> Option<&str> {
        match self {
            Self::ContractViolation { schema_version, .. } => schema_version.as_deref(),
            _ => None,
        }
    }

    /// Returns true for [`ContractError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for [`ContractError::MalformedJson`].
    pub fn is_malformed_json(&self) -> bool {
        matches!(self, Self::MalformedJson { .. })
    }

    /// Returns true for [`ContractError::ContractViolation`].
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }
}
