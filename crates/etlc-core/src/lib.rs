//! # etlc-core: Foundational Types for the ETL Contracts
//!
//! This crate defines the primitive value types shared by the job request,
//! job result, and manifest contracts. Every other crate in the workspace
//! depends on `etlc-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for contract primitives.** `Fingerprint`, `RunId`
//!    and `IsoDateTime` can only be constructed through validating
//!    constructors, so a typed record never holds a malformed value.
//!
//! 2. **Wire spelling is preserved.** A fingerprint keeps its original case
//!    and a datetime keeps its original text. Re-serializing a validated
//!    record yields the bytes other runtimes sent.
//!
//! 3. **`Fingerprint::compute()` is the only producer-side digest path.**
//!    Fingerprints written into manifests are lowercase SHA-256 hex.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `etlc-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use digest::{is_sha256_hex, sha256_hex, Fingerprint, SHA256_HEX_LEN};
pub use error::EtlcError;
pub use identity::RunId;
pub use temporal::IsoDateTime;
