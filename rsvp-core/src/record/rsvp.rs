use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{
    Record, RecordKind, default_party_size, lenient_party_size, lenient_string, optional,
    party_size, reject_honeypot, required, required_email, text, timestamp,
};
use crate::error::ValidationError;

/// Whether the guest is coming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    Yes,
    No,
    Maybe,
}

impl Attendance {
    pub fn as_str(self) -> &'static str {
        match self {
            Attendance::Yes => "yes",
            Attendance::No => "no",
            Attendance::Maybe => "maybe",
        }
    }

    /// Listing order: coming first, undecided next, declines last.
    pub fn sort_rank(self) -> u8 {
        match self {
            Attendance::Yes => 0,
            Attendance::Maybe => 1,
            Attendance::No => 2,
        }
    }
}

impl FromStr for Attendance {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Attendance::Yes),
            "no" => Ok(Attendance::No),
            "maybe" => Ok(Attendance::Maybe),
            "" => Err(ValidationError::MissingField("attending")),
            _ => Err(ValidationError::InvalidValue {
                field: "attending",
                value: s.trim().to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Attendance {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One RSVP form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, with = "text")]
    pub organization: Option<String>,
    pub attending: Attendance,
    /// Party size, counting the guest.
    #[serde(default = "default_party_size", deserialize_with = "lenient_party_size")]
    pub guests: u32,
    #[serde(default, with = "text")]
    pub message: Option<String>,
    #[serde(default = "timestamp::epoch", with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Raw RSVP form fields, as typed.
#[derive(Debug, Clone, Default)]
pub struct RsvpInput {
    pub name: String,
    pub email: String,
    pub organization: Option<String>,
    pub attending: String,
    pub guests: Option<String>,
    pub message: Option<String>,
    /// Hidden honeypot field; humans leave it empty.
    pub company: Option<String>,
}

impl Record for RsvpRecord {
    type Input = RsvpInput;

    const KIND: RecordKind = RecordKind::Rsvp;

    const CSV_HEADER: &'static [&'static str] = &[
        "name",
        "email",
        "organization",
        "attending",
        "guests",
        "message",
        "timestamp",
    ];

    fn from_input(input: RsvpInput, submitted_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        reject_honeypot(input.company.as_deref())?;

        let name = required("name", &input.name)?;
        let email = required_email(&input.email)?;
        let attending: Attendance = input.attending.parse()?;
        let guests = party_size("guests", input.guests.as_deref())?;

        Ok(RsvpRecord {
            name,
            email,
            organization: optional(input.organization),
            attending,
            guests,
            message: optional(input.message),
            timestamp: submitted_at,
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
            self.organization.clone().unwrap_or_default(),
            self.attending.to_string(),
            self.guests.to_string(),
            self.message.clone().unwrap_or_default(),
            timestamp::format(&self.timestamp),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn input() -> RsvpInput {
        RsvpInput {
            name: "  Ann Smith ".to_string(),
            email: " ann@example.com".to_string(),
            organization: Some("   ".to_string()),
            attending: "Yes".to_string(),
            guests: Some("2".to_string()),
            message: Some(" Congrats! ".to_string()),
            company: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn from_input_trims_and_parses() {
        let record = RsvpRecord::from_input(input(), now()).unwrap();

        assert_eq!(record.name, "Ann Smith");
        assert_eq!(record.email, "ann@example.com");
        assert_eq!(record.organization, None);
        assert_eq!(record.attending, Attendance::Yes);
        assert_eq!(record.guests, 2);
        assert_eq!(record.message.as_deref(), Some("Congrats!"));
        assert_eq!(record.timestamp, now());
    }

    #[test]
    fn from_input_requires_name_email_and_attendance() {
        let mut missing_name = input();
        missing_name.name = " ".to_string();
        assert_eq!(
            RsvpRecord::from_input(missing_name, now()),
            Err(ValidationError::MissingField("name"))
        );

        let mut missing_email = input();
        missing_email.email = String::new();
        assert_eq!(
            RsvpRecord::from_input(missing_email, now()),
            Err(ValidationError::MissingField("email"))
        );

        let mut missing_attending = input();
        missing_attending.attending = String::new();
        assert_eq!(
            RsvpRecord::from_input(missing_attending, now()),
            Err(ValidationError::MissingField("attending"))
        );
    }

    #[test]
    fn from_input_rejects_unknown_attendance() {
        let mut bad = input();
        bad.attending = "probably".to_string();
        assert!(matches!(
            RsvpRecord::from_input(bad, now()),
            Err(ValidationError::InvalidValue { field: "attending", .. })
        ));
    }

    #[test]
    fn wire_format_matches_sheet_columns() {
        let record = RsvpRecord::from_input(input(), now()).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "Ann Smith",
                "email": "ann@example.com",
                "organization": "",
                "attending": "yes",
                "guests": 2,
                "message": "Congrats!",
                "timestamp": "2025-10-01T12:00:00.000Z",
            })
        );
    }

    #[test]
    fn decodes_loose_sheet_rows() {
        let row = json!({
            "name": "Bob",
            "email": "bob@example.com",
            "organization": null,
            "attending": "MAYBE",
            "guests": "",
            "timestamp": "2025-10-01T12:00:00.123Z",
        });

        let record: RsvpRecord = serde_json::from_value(row).unwrap();

        assert_eq!(record.attending, Attendance::Maybe);
        assert_eq!(record.guests, 1);
        assert_eq!(record.organization, None);
        assert_eq!(record.message, None);
        assert_eq!(record.timestamp.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn csv_fields_follow_header_order() {
        let record = RsvpRecord::from_input(input(), now()).unwrap();
        let fields = record.csv_fields();

        assert_eq!(fields.len(), RsvpRecord::CSV_HEADER.len());
        assert_eq!(fields[3], "yes");
        assert_eq!(fields[4], "2");
        assert_eq!(fields[6], "2025-10-01T12:00:00.000Z");
    }
}
