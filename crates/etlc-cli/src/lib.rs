//! # etlc-cli: CLI Tool for the ETL Contract Layer
//!
//! Provides the `etlc` command-line interface.
//!
//! ## Subcommands
//!
//! - `etlc validate`: Validate request, result or manifest files.
//! - `etlc fingerprint`: SHA-256 fingerprints for `contentFingerprint`
//!   and `artifactRefs`.
//! - `etlc schema`: Print the published JSON Schema of a contract.
//!
//! ```bash
//! etlc validate request jobs/r1.json
//! etlc validate manifest out/*/manifest.json --json --enforce-chronology
//! etlc fingerprint corpus/*.pdf
//! ```
//!
//! ## Exit Codes
//!
//! `0` when everything passed, `1` when any document was rejected, `2` when
//! a file could not be found or read.

pub mod fingerprint;
pub mod schema;
pub mod validate;

/// Every input passed.
pub const EXIT_OK: u8 = 0;
/// At least one document was rejected.
pub const EXIT_REJECTED: u8 = 1;
/// At least one input could not be found or read.
pub const EXIT_OPERATIONAL: u8 = 2;
