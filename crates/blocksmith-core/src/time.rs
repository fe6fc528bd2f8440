//! Timestamp normalization.
//!
//! Calendar collaborators hand out a mix of `Z`-suffixed UTC strings,
//! offset-aware strings and bare local date-times. All of them are reduced to
//! a timezone-naive [`NaiveDateTime`] by dropping the offset and keeping the
//! wall-clock reading.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ValidationError;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 date-time, stripping any offset.
///
/// # Errors
/// Returns [`ValidationError::InvalidTimestamp`] if the value is not a
/// date-time (a bare date is rejected).
pub fn parse_naive(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ValidationError::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Parse a `YYYY-MM-DD` date and return its midnight.
pub fn parse_day_start(value: &str) -> Result<NaiveDateTime, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ValidationError::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Serde adapter for optional timestamps that accepts offset-aware input.
pub mod naive_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| super::parse_naive(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
