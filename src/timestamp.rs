//! Wire format for Migadu timestamps.
//!
//! The API uses millisecond precision and a numeric offset without a colon,
//! e.g. `2021-03-04T05:06:07.890+0000`. Use with
//! `#[serde(with = "crate::timestamp")]` on `Option<DateTime<FixedOffset>>`
//! fields; `null` and `""` decode to `None`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

/// `chrono` format string of the wire representation.
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Length of `2021-03-04T05:06:07.890+0000`.
const WIRE_LEN: usize = 28;

/// Error returned by [`parse`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// Milliseconds or offset missing, or the offset has a colon.
    #[error("expected YYYY-MM-DDTHH:MM:SS.mmm+HHMM")]
    Shape,
    /// Right shape, but not a valid date or time.
    #[error(transparent)]
    Chrono(#[from] chrono::ParseError),
}

/// Render a timestamp in the wire format.
pub fn format(value: &DateTime<FixedOffset>) -> String {
    value.format(FORMAT).to_string()
}

/// Parse a timestamp in the wire format.
///
/// Stricter than `chrono` alone: exactly three fractional digits and a
/// four-digit offset without a colon are required.
pub fn parse(value: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    if !has_wire_shape(value.as_bytes()) {
        return Err(ParseError::Shape);
    }
    Ok(DateTime::parse_from_str(value, FORMAT)?)
}

fn has_wire_shape(raw: &[u8]) -> bool {
    raw.len() == WIRE_LEN
        && raw[19] == b'.'
        && raw[20..23].iter().all(u8::is_ascii_digit)
        && matches!(raw[23], b'+' | b'-')
        && raw[24..].iter().all(u8::is_ascii_digit)
}

/// Serialize an optional timestamp as a wire-format string or `null`.
pub fn serialize<S>(value: &Option<DateTime<FixedOffset>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serializer.serialize_str(&format(value)),
        None => serializer.serialize_none(),
    }
}

/// Deserialize a wire-format string; `null` and `""` become `None`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => parse(&raw)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format_args!("invalid timestamp {raw:?}: {e}"))),
    }
}
