//! The event being RSVP'd to: calendar link and countdown.

use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;

const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";
const DEFAULT_SUMMARY: &str = "Event";

/// When and where the event happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub title: String,
    pub start: DateTime<FixedOffset>,
    pub end: Option<DateTime<FixedOffset>>,
    pub description: String,
    pub location: String,
}

impl EventDetails {
    /// Title, or a generic one when unset.
    pub fn summary(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_SUMMARY
        } else {
            &self.title
        }
    }

    /// End time, falling back to the start.
    pub fn end_or_start(&self) -> DateTime<FixedOffset> {
        self.end.unwrap_or(self.start)
    }

    /// "Add to Google Calendar" template link.
    pub fn calendar_link(&self) -> String {
        let dates = format!(
            "{}/{}",
            compact_utc(&self.start),
            compact_utc(&self.end_or_start())
        );

        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("action", "TEMPLATE")
            .append_pair("text", &self.title)
            .append_pair("dates", &dates)
            .append_pair("details", &self.description)
            .append_pair("location", &self.location)
            .finish();

        format!("{GOOGLE_CALENDAR_URL}?{query}")
    }

    pub fn countdown(&self, now: DateTime<Utc>) -> Countdown {
        Countdown::until(self.start.with_timezone(&Utc), now)
    }
}

/// Compact UTC timestamp used by calendar formats, e.g. `20251019T010000Z`.
pub fn compact_utc<Tz: chrono::TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
}

/// Time left until the event starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Remaining { days: i64, hours: i64, minutes: i64 },
    Started,
}

impl Countdown {
    pub fn until(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let diff = start - now;
        if diff <= chrono::Duration::zero() {
            return Countdown::Started;
        }

        let total_minutes = diff.num_minutes();
        Countdown::Remaining {
            days: total_minutes / (24 * 60),
            hours: (total_minutes / 60) % 24,
            minutes: total_minutes % 60,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Countdown::Remaining {
                days,
                hours,
                minutes,
            } => write!(f, "{days}d {hours}h {minutes}m until the celebration"),
            Countdown::Started => write!(f, "Event is happening now or has passed."),
        }
    }
}
