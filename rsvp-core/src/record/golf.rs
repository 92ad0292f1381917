use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Record, RecordKind, default_party_size, lenient_party_size, lenient_string, optional,
    party_size, reject_honeypot, required, required_email, text, timestamp,
};
use crate::error::ValidationError;

/// Discriminant written into every golf row so the shared sheet can tell
/// golf signups from RSVPs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GolfTag {
    #[default]
    Golf,
}

/// One golf outing signup.
///
/// The email is stored and synced but never shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GolfRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, with = "text")]
    pub handicap: Option<String>,
    #[serde(default = "default_party_size", deserialize_with = "lenient_party_size")]
    pub party_size: u32,
    #[serde(default, with = "text")]
    pub pairing_pref: Option<String>,
    #[serde(default, with = "text")]
    pub notes: Option<String>,
    #[serde(default = "timestamp::epoch", with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub tag: GolfTag,
}

/// Raw golf signup form fields, as typed.
#[derive(Debug, Clone, Default)]
pub struct GolfInput {
    pub name: String,
    pub email: String,
    pub handicap: Option<String>,
    pub party_size: Option<String>,
    pub pairing_pref: Option<String>,
    pub notes: Option<String>,
    /// Hidden honeypot field; humans leave it empty.
    pub company: Option<String>,
}

impl Record for GolfRecord {
    type Input = GolfInput;

    const KIND: RecordKind = RecordKind::Golf;

    const CSV_HEADER: &'static [&'static str] = &[
        "name",
        "email",
        "handicap",
        "party_size",
        "pairing_pref",
        "notes",
        "timestamp",
    ];

    fn from_input(input: GolfInput, submitted_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        reject_honeypot(input.company.as_deref())?;

        Ok(GolfRecord {
            name: required("name", &input.name)?,
            email: required_email(&input.email)?,
            handicap: optional(input.handicap),
            party_size: party_size("party_size", input.party_size.as_deref())?,
            pairing_pref: optional(input.pairing_pref),
            notes: optional(input.notes),
            timestamp: submitted_at,
            tag: GolfTag::Golf,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn submitted_at(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.handicap.clone().unwrap_or_default(),
            self.party_size.to_string(),
            self.pairing_pref.clone().unwrap_or_default(),
            self.notes.clone().unwrap_or_default(),
            timestamp::format(&self.timestamp),
        ]
    }
}
