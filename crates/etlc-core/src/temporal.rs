//! # Temporal Types: ISO-8601 Datetimes
//!
//! Defines `IsoDateTime`, the datetime type used by `createdAt` and
//! `completedAt`. Contracts are exchanged between runtimes whose clocks
//! format timestamps differently, so acceptance is deliberately broad:
//!
//! - A trailing `Z` is read as `+00:00`.
//! - Date only (`2024-01-01`), or date and time separated by `T` or a space.
//! - Hour only, minutes, seconds and fractional seconds (`12`, `12:30`,
//!   `12:30:45.123456`).
//! - With or without a `±HH:MM` offset.
//!
//! The original text is kept verbatim; only validity is enforced. A value
//! parsed with an offset is "aware", one without is "naive". Aware and naive
//! values cannot be ordered against each other.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EtlcError;

const AWARE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The parsed form of an [`IsoDateTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeValue {
    /// Carried an explicit UTC offset (or `Z`).
    Aware(DateTime<FixedOffset>),
    /// No offset; interpretation is up to the producer.
    Naive(NaiveDateTime),
}

/// An ISO-8601 datetime that remembers how it was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IsoDateTime {
    raw: String,
    value: DateTimeValue,
}

impl IsoDateTime {
    /// Parse an ISO-8601 datetime string.
    ///
    /// # Errors
    ///
    /// Returns [`EtlcError::InvalidDateTime`] if no accepted layout matches.
    pub fn parse(value: impl Into<String>) -> Result<Self, EtlcError> {
        let raw = value.into();
        match parse_value(&raw) {
            Some(value) => Ok(Self { raw, value }),
            None => Err(EtlcError::InvalidDateTime { value: raw }),
        }
    }

    /// Build from a UTC instant, rendered with seconds precision and `Z`.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self {
            raw: dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            value: DateTimeValue::Aware(dt.into()),
        }
    }

    /// The current UTC time.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// The datetime exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed value.
    pub fn value(&self) -> DateTimeValue {
        self.value
    }

    /// Returns true if the datetime carried an offset.
    pub fn is_offset_aware(&self) -> bool {
        matches!(self.value, DateTimeValue::Aware(_))
    }

    /// Convert to UTC. `None` for naive datetimes.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self.value {
            DateTimeValue::Aware(dt) => Some(dt.with_timezone(&Utc)),
            DateTimeValue::Naive(_) => None,
        }
    }

    /// Order two datetimes. `None` when one is aware and the other naive.
    pub fn compare(&self, other: &IsoDateTime) -> Option<Ordering> {
        match (self.value, other.value) {
            (DateTimeValue::Aware(a), DateTimeValue::Aware(b)) => Some(a.cmp(&b)),
            (DateTimeValue::Naive(a), DateTimeValue::Naive(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}

fn parse_value(s: &str) -> Option<DateTimeValue> {
    let normalized = match s.strip_suffix('Z') {
        Some(head) => format!("{head}+00:00"),
        None => s.to_string(),
    };
    let normalized = expand_hour_only(&normalized).unwrap_or(normalized);

    for fmt in AWARE_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
            return Some(DateTimeValue::Aware(dt));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(DateTimeValue::Naive(dt));
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(DateTimeValue::Naive)
}

impl TryFrom<String> for IsoDateTime {
    type Error = EtlcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<IsoDateTime> for String {
    fn from(value: IsoDateTime) -> Self {
        value.raw
    }
}

impl std::fmt::Display for IsoDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// `2024-01-01T12` and `2024-01-01 12+02:00` carry an hour but no minute,
/// which chrono cannot parse; rewrite them with `:00` minutes.
fn expand_hour_only(s: &str) -> Option<String> {
    let head = s.get(..13)?;
    let rest = s.get(13..)?;
    let b = head.as_bytes();
    let hour_only = matches!(b[10], b'T' | b' ')
        && b[11].is_ascii_digit()
        && b[12].is_ascii_digit()
        && (rest.is_empty() || rest.starts_with(['+', '-']));
    hour_only.then(|| format!("{head}:00{rest}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_z_suffix_equals_zero_offset() {
        let z = IsoDateTime::parse("2024-01-01T00:00:00Z").unwrap();
        let offset = IsoDateTime::parse("2024-01-01T00:00:00+00:00").unwrap();
        assert_eq!(z.to_utc(), offset.to_utc());
        assert_eq!(z.compare(&offset), Some(Ordering::Equal));
        assert_eq!(z.as_str(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_accepts_fractional_and_offsets() {
        let dt = IsoDateTime::parse("2024-06-30T17:00:00.123456+05:00").unwrap();
        assert_eq!(
            dt.to_utc().unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
                + chrono::Duration::microseconds(123_456)
        );
    }

    #[test]
    fn test_accepts_naive_and_date_only() {
        for s in [
            "2024-01-01",
            "2024-01-01T12:30",
            "2024-01-01 12:30:45",
            "2024-01-01T12:30:45.5",
        ] {
            let dt = IsoDateTime::parse(s).unwrap_or_else(|e| panic!("{s}: {e}"));
            assert!(!dt.is_offset_aware(), "{s} should be naive");
            assert!(dt.to_utc().is_none());
        }
    }

    #[test]
    fn test_space_separator_with_offset() {
        let dt = IsoDateTime::parse("2024-01-01 08:00:00-04:00").unwrap();
        assert_eq!(dt.to_utc().unwrap(), Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_rejects_garbage() {
        for s in [
            "",
            "not-a-date",
            "Z",
            "2024-13-01T00:00:00Z",
            "2024-01-01T25:00:00Z",
            "01/02/2024",
            "2024-01-01T00:00:00 UTC",
        ] {
            let err = IsoDateTime::parse(s).unwrap_err();
            assert!(matches!(err, EtlcError::InvalidDateTime { .. }), "{s}");
        }
    }

    #[test]
    fn test_mixed_awareness_is_unordered() {
        let aware = IsoDateTime::parse("2024-01-01T00:00:00Z").unwrap();
        let naive = IsoDateTime::parse("2024-01-02T00:00:00").unwrap();
        assert_eq!(aware.compare(&naive), None);
    }

    #[test]
    fn test_ordering() {
        let earlier = IsoDateTime::parse("2024-01-01T12:00:00Z").unwrap();
        let later = IsoDateTime::parse("2024-01-01T12:00:01Z").unwrap();
        assert_eq!(earlier.compare(&later), Some(Ordering::Less));
    }

    #[test]
    fn test_hour_only_times() {
        let naive = IsoDateTime::parse("2024-01-01T12").unwrap();
        assert!(!naive.is_offset_aware());
        assert_eq!(naive.as_str(), "2024-01-01T12");
        let aware = IsoDateTime::parse("2024-01-01 12Z").unwrap();
        assert_eq!(aware.to_utc(), Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()));
        assert!(IsoDateTime::parse("2024-01-01T12-05:00").unwrap().is_offset_aware());
        assert!(IsoDateTime::parse("2024-01-01T1").is_err());
        assert!(IsoDateTime::parse("2024-01-01T25").is_err());
    }

    #[test]
    fn test_from_utc_renders_z() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let iso = IsoDateTime::from_utc(dt);
        assert_eq!(iso.as_str(), "2026-01-15T12:00:00Z");
        assert_eq!(IsoDateTime::parse(iso.as_str()).unwrap(), iso);
    }

    #[test]
    fn test_serde_preserves_spelling() {
        let json = serde_json::json!("2024-01-01 00:00:00.000+00:00");
        let dt: IsoDateTime = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&dt).unwrap(), json);
        assert!(serde_json::from_value::<IsoDateTime>(serde_json::json!("yesterday")).is_err());
    }
}
