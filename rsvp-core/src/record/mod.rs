//! Submission records.
//!
//! Two record shapes share one [`Record`] trait so the store, cache and
//! exports can be written once. Records travel as loosely typed JSON rows
//! (the remote is a spreadsheet), so decoding is lenient: numbers may arrive
//! as strings, optional text may be null or blank.

mod golf;
mod rsvp;

pub use golf::{GolfInput, GolfRecord, GolfTag};
pub use rsvp::{Attendance, RsvpInput, RsvpRecord};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use crate::error::ValidationError;

/// Which list a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Rsvp,
    Golf,
}

impl RecordKind {
    /// Fixed local cache key for this kind.
    pub fn cache_key(self) -> &'static str {
        match self {
            RecordKind::Rsvp => "rsvps_cache",
            RecordKind::Golf => "golf_cache",
        }
    }

    /// Value of the `type` discriminator sent to the remote, if any.
    /// RSVP is the remote's default list and sends none.
    pub fn type_param(self) -> Option<&'static str> {
        match self {
            RecordKind::Rsvp => None,
            RecordKind::Golf => Some("golf"),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordKind::Rsvp => write!(f, "RSVP"),
            RecordKind::Golf => write!(f, "golf"),
        }
    }
}

/// A submission that can be stored, synced and exported.
pub trait Record: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    /// Raw form input this record is built from.
    type Input: Clone;

    const KIND: RecordKind;

    /// Column names of the CSV export, in order.
    const CSV_HEADER: &'static [&'static str];

    /// Validate `input` and build a record stamped with `submitted_at`.
    fn from_input(input: Self::Input, submitted_at: DateTime<Utc>) -> Result<Self, ValidationError>;

    fn name(&self) -> &str;

    fn submitted_at(&self) -> DateTime<Utc>;

    /// Field values matching [`Self::CSV_HEADER`].
    fn csv_fields(&self) -> Vec<String>;
}

/// Decode loosely typed rows into records, skipping rows that don't decode
/// or have no name.
pub fn decode_rows<R: Record>(rows: Vec<Value>) -> Vec<R> {
    let total = rows.len();
    let records: Vec<R> = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<R>(row) {
            Ok(record) if !record.name().trim().is_empty() => Some(record),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(kind = %R::KIND, error = %e, "skipping undecodable row");
                None
            }
        })
        .collect();

    if records.len() < total {
        tracing::debug!(kind = %R::KIND, kept = records.len(), total, "dropped invalid rows");
    }

    records
}

// Input validation helpers

pub(crate) fn reject_honeypot(company: Option<&str>) -> Result<(), ValidationError> {
    match company {
        Some(value) if !value.trim().is_empty() => Err(ValidationError::Spam),
        _ => Ok(()),
    }
}

pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value.to_string())
}

pub(crate) fn required_email(value: &str) -> Result<String, ValidationError> {
    let email = required("email", value)?;
    if !email.contains('@') {
        return Err(ValidationError::InvalidValue {
            field: "email",
            value: email,
        });
    }
    Ok(email)
}

pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Blank means the default of one; anything else must be a positive integer.
pub(crate) fn party_size(field: &'static str, value: Option<&str>) -> Result<u32, ValidationError> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Ok(1);
    }
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ValidationError::InvalidValue {
            field,
            value: value.to_string(),
        }),
    }
}

// Wire (de)serialization helpers

/// Timestamps are written like JavaScript's `toISOString()`.
pub(crate) mod timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format(ts))
    }

    /// Missing or unreadable timestamps decode as the Unix epoch, keeping
    /// the row.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        let parsed = match &value {
            Some(Value::String(raw)) if !raw.trim().is_empty() => {
                DateTime::parse_from_rfc3339(raw.trim())
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok()
            }
            _ => None,
        };

        if parsed.is_none() && value.as_ref().is_some_and(|v| !v.is_null()) {
            tracing::debug!(?value, "unreadable timestamp, using epoch");
        }

        Ok(parsed.unwrap_or(DateTime::<Utc>::UNIX_EPOCH))
    }

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }
}

/// Optional text: absent is written as an empty string, and blank, null or
/// numeric cells are accepted on the way back in.
pub(crate) mod text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or_default())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::String(s)) => optional(Some(s)),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        })
    }
}

/// Required text that may arrive as a number or null.
pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(text::deserialize(d)?.unwrap_or_default())
}

/// Party sizes come back as numbers or numeric strings; anything unusable is one.
pub(crate) fn lenient_party_size<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    let size = match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0)
                .map(|f| f as u64)
        }),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(size
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
        .unwrap_or(1))
}

pub(crate) fn default_party_size() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn party_size_defaults_blank_to_one() {
        assert_eq!(party_size("guests", None), Ok(1));
        assert_eq!(party_size("guests", Some("  ")), Ok(1));
        assert_eq!(party_size("guests", Some(" 3 ")), Ok(3));
    }

    #[test]
    fn party_size_rejects_zero_and_text() {
        assert!(matches!(
            party_size("guests", Some("0")),
            Err(ValidationError::InvalidValue { field: "guests", .. })
        ));
        assert!(party_size("guests", Some("two")).is_err());
    }

    #[test]
    fn honeypot_rejects_filled_field() {
        assert_eq!(reject_honeypot(Some("Acme")), Err(ValidationError::Spam));
        assert_eq!(reject_honeypot(Some("")), Ok(()));
        assert_eq!(reject_honeypot(None), Ok(()));
    }

    #[test]
    fn decode_rows_skips_nameless_and_broken_rows() {
        let rows = vec![
            json!({"name": "Ann", "email": "ann@example.com", "attending": "yes", "guests": "2"}),
            json!({"name": "", "email": "x@example.com", "attending": "no"}),
            json!({"name": "Bob", "attending": "perhaps"}),
            json!("not an object"),
        ];

        let records: Vec<RsvpRecord> = decode_rows(rows);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ann");
        assert_eq!(records[0].guests, 2);
    }

    #[test]
    fn decode_rows_keeps_rows_with_unreadable_timestamps() {
        let rows = vec![
            json!({"name": "Ann", "attending": "yes", "timestamp": "10/1/2025 12:00:00"}),
            json!({"name": "Bob", "attending": "no", "timestamp": 45931.5}),
            json!({"name": "Cy", "attending": "maybe", "timestamp": "2025-10-01T12:00:00.000Z"}),
        ];

        let records: Vec<RsvpRecord> = decode_rows(rows);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].timestamp, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(records[1].timestamp, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(records[2].timestamp.to_rfc3339(), "2025-10-01T12:00:00+00:00");
    }

    #[test]
    fn cache_keys_are_fixed_per_kind() {
        assert_eq!(RecordKind::Rsvp.cache_key(), "rsvps_cache");
        assert_eq!(RecordKind::Golf.cache_key(), "golf_cache");
        assert_eq!(RecordKind::Rsvp.type_param(), None);
        assert_eq!(RecordKind::Golf.type_param(), Some("golf"));
    }
}
