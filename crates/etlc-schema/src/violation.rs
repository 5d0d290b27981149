//! # Contract Violations
//!
//! A single failed rule is a [`Violation`]: where it happened (a JSON
//! Pointer into the wire-named document), what category of rule failed,
//! and a human-readable message. Validation never stops at the first
//! failure; every violation found is collected into [`ContractViolations`].

use std::fmt;

use serde::Serialize;

/// Category of a failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is absent.
    MissingField,
    /// A field has the wrong JSON type.
    WrongType,
    /// A literal tag or enumerated value did not match.
    LiteralMismatch,
    /// A string did not match its required pattern.
    PatternMismatch,
    /// A string, sequence or mapping that must be non-empty was empty.
    EmptyValue,
    /// A number fell outside its permitted range.
    OutOfRange,
    /// A string is not an ISO-8601 datetime.
    InvalidDateTime,
    /// Both or neither of an exactly-one-of field pair were supplied.
    MutualExclusion,
    /// A record carried a field it does not define (strict mode only).
    UnknownField,
    /// `completedAt` precedes `createdAt` (opt-in check).
    Chronology,
    /// Anything not covered above.
    Other,
}

impl ViolationKind {
    /// Stable identifier for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::WrongType => "wrong_type",
            Self::LiteralMismatch => "literal_mismatch",
            Self::PatternMismatch => "pattern_mismatch",
            Self::EmptyValue => "empty_value",
            Self::OutOfRange => "out_of_range",
            Self::InvalidDateTime => "invalid_datetime",
            Self::MutualExclusion => "mutual_exclusion",
            Self::UnknownField => "unknown_field",
            Self::Chronology => "chronology",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON Pointer to the violating field (`""` for the document root).
    pub path: String,
    /// Which rule category failed.
    pub kind: ViolationKind,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    /// Create a violation.
    pub fn new(path: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "  (root) [{}]: {}", self.kind, self.message)
        } else {
            write!(f, "  {} [{}]: {}", self.path, self.kind, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContractViolations {
    violations: Vec<Violation>,
}

impl ContractViolations {
    /// A collection holding exactly one violation.
    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// Record a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Iterate over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Returns true if some violation sits at `path` with the given kind.
    pub fn contains(&self, path: &str, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.path == path && v.kind == kind)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl<'a> IntoIterator for &'a ContractViolations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for ContractViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Append one reference token to a JSON Pointer, escaping `~` and `/`.
pub(crate) fn pointer_push(base: &str, token: &str) -> String {
    let escaped = token.replace('~', "~0").replace('/', "~1");
    format!("{base}/{escaped}")
}
