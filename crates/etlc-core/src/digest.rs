//! # Content Fingerprints
//!
//! Defines `Fingerprint`, the SHA-256 content hash carried by manifest
//! provenance (`contentFingerprint`) and job artifacts (`artifactRefs`).
//!
//! ## Invariant
//!
//! A `Fingerprint` is always exactly 64 hexadecimal characters. Case is
//! not significant for validity, and the original spelling is preserved so
//! a validated record serializes back to the bytes it was read from.
//! Fingerprints computed here are always lowercase.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::EtlcError;

/// Length of a SHA-256 digest rendered as hex.
pub const SHA256_HEX_LEN: usize = 64;

/// Returns true if `s` is exactly 64 hexadecimal characters (either case).
pub fn is_sha256_hex(s: &str) -> bool {
    s.len() == SHA256_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Compute the lowercase SHA-256 hex digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    to_hex(&Sha256::digest(data))
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// A SHA-256 content fingerprint in hex form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Parse a fingerprint, accepting upper- and lowercase hex digits.
    ///
    /// # Errors
    ///
    /// Returns [`EtlcError::InvalidFingerprint`] if the value is not
    /// exactly 64 hexadecimal characters.
    pub fn parse(value: impl Into<String>) -> Result<Self, EtlcError> {
        let s = value.into();
        if s.len() != SHA256_HEX_LEN {
            let reason = format!("expected {SHA256_HEX_LEN} hex characters, got {}", s.len());
            return Err(EtlcError::InvalidFingerprint { value: s, reason });
        }
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            let reason = format!("non-hexadecimal character {c:?}");
            return Err(EtlcError::InvalidFingerprint { value: s, reason });
        }
        Ok(Self(s))
    }

    /// Fingerprint an in-memory byte slice.
    pub fn compute(data: &[u8]) -> Self {
        Self(sha256_hex(data))
    }

    /// Fingerprint everything readable from `reader`.
    pub fn of_reader(mut reader: impl Read) -> Result<Self, EtlcError> {
        let mut hasher = Sha256::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(Self(to_hex(&hasher.finalize())))
    }

    /// Fingerprint the contents of a file.
    pub fn of_file(path: impl AsRef<Path>) -> Result<Self, EtlcError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::of_reader(std::io::BufReader::new(file))
    }

    /// The fingerprint as it was supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fingerprint with lowercase hex digits.
    pub fn to_lowercase(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Decode the fingerprint into its 32 raw digest bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, pair) in self.0.as_bytes().chunks_exact(2).enumerate() {
            out[i] = (nibble(pair[0]) << 4) | nibble(pair[1]);
        }
        out
    }

    /// Case-insensitive comparison of two fingerprints.
    pub fn matches(&self, other: &Fingerprint) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Returns true if this fingerprint is the SHA-256 of `data`.
    pub fn verify(&self, data: &[u8]) -> bool {
        self.matches(&Self::compute(data))
    }
}

fn nibble(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = EtlcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Fingerprint> for String {
    fn from(value: Fingerprint) -> Self {
        value.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Fingerprint {
    type Err = EtlcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_is_lowercase_hex() {
        let fp = Fingerprint::compute(b"turtle");
        assert_eq!(fp.as_str().len(), SHA256_HEX_LEN);
        assert!(fp.as_str().chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_parse_accepts_uppercase() {
        let upper = "A".repeat(64);
        let fp = Fingerprint::parse(upper.clone()).unwrap();
        assert_eq!(fp.as_str(), upper);
        assert_eq!(fp.to_lowercase(), "a".repeat(64));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let err = Fingerprint::parse("abc").unwrap_err();
        assert!(err.to_string().contains("expected 64"));
        assert!(Fingerprint::parse("a".repeat(65)).is_err());
        assert!(Fingerprint::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let mut s = "0".repeat(63);
        s.push('g');
        let err = Fingerprint::parse(s).unwrap_err();
        assert!(matches!(err, EtlcError::InvalidFingerprint { .. }));
    }

    #[test]
    fn test_multibyte_input_rejected_without_panic() {
        // 32 two-byte characters make a 64-byte string.
        let s = "é".repeat(32);
        assert_eq!(s.len(), 64);
        assert!(Fingerprint::parse(s.clone()).is_err());
        assert!(!is_sha256_hex(&s));
    }

    #[test]
    fn test_matches_ignores_case() {
        let lower = Fingerprint::compute(b"doc-1");
        let upper = Fingerprint::parse(lower.as_str().to_ascii_uppercase()).unwrap();
        assert_ne!(lower, upper);
        assert!(lower.matches(&upper));
        assert!(upper.verify(b"doc-1"));
        assert!(!upper.verify(b"doc-2"));
    }

    #[test]
    fn test_to_bytes_roundtrip() {
        let fp = Fingerprint::compute(b"abc");
        let bytes = fp.to_bytes();
        assert_eq!(to_hex(&bytes), fp.as_str());
    }

    #[test]
    fn test_of_reader_matches_compute() {
        let data = vec![7u8; 20_000];
        let streamed = Fingerprint::of_reader(&data[..]).unwrap();
        assert_eq!(streamed, Fingerprint::compute(&data));
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let ok: Fingerprint = serde_json::from_value(serde_json::json!("f".repeat(64))).unwrap();
        assert_eq!(serde_json::to_value(&ok).unwrap(), serde_json::json!("f".repeat(64)));
        assert!(serde_json::from_value::<Fingerprint>(serde_json::json!("nope")).is_err());
    }
}
