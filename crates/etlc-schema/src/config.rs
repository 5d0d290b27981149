//! # Validation Configuration
//!
//! Knobs that tighten validation beyond the published contract. The
//! defaults reproduce the contract exactly: unknown fields are ignored and
//! manifest timestamps are not ordered against each other.
//!
//! Environment variables (read by [`ValidationConfig::from_env`]):
//! - `ETLC_UNKNOWN_FIELDS`: `ignore` (default) or `reject`.
//! - `ETLC_ENFORCE_CHRONOLOGY`: `1`/`true`/`yes` or `0`/`false`/`no` (default).

use std::str::FromStr;

/// What to do with record fields the contract does not define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFieldPolicy {
    /// Keep them through normalization; the typed record drops them.
    #[default]
    Ignore,
    /// Report each one as an `unknown_field` violation.
    Reject,
}

impl FromStr for UnknownFieldPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            _ => Err(ConfigError::InvalidValue {
                var: UNKNOWN_FIELDS_VAR,
                value: s.to_string(),
                expected: "ignore or reject",
            }),
        }
    }
}

const UNKNOWN_FIELDS_VAR: &str = "ETLC_UNKNOWN_FIELDS";
const CHRONOLOGY_VAR: &str = "ETLC_ENFORCE_CHRONOLOGY";

/// Options applied by every validation entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationConfig {
    /// Handling of undefined record fields.
    pub unknown_fields: UnknownFieldPolicy,
    /// Require manifest `completedAt` to be no earlier than `createdAt`.
    pub enforce_chronology: bool,
}

impl ValidationConfig {
    /// Every optional check switched on.
    pub fn strict() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Reject,
            enforce_chronology: true,
        }
    }

    /// Load configuration from environment variables, falling back to the
    /// defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to a value
    /// that cannot be interpreted.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(UNKNOWN_FIELDS_VAR) {
            config.unknown_fields = raw.parse()?;
        }
        if let Some(raw) = lookup(CHRONOLOGY_VAR) {
            config.enforce_chronology = parse_flag(CHRONOLOGY_VAR, &raw)?;
        }
        Ok(config)
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: raw.to_string(),
            expected: "1/true/yes or 0/false/no",
        }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: expected {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}
