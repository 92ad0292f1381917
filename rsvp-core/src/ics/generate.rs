//! ICS file generation.

use crate::event::{EventDetails, compact_utc};
use icalendar::{Calendar, Component, EventLike};

const PRODID: &str = "-//rsvp//Event//EN";

/// Generate a minimal single-event calendar for `event`.
///
/// DTSTAMP reuses the start time so the output only depends on its inputs.
pub fn generate_ics(event: &EventDetails, uid: &str) -> String {
    let mut cal = Calendar::new();

    let start = compact_utc(&event.start);
    let end = compact_utc(&event.end_or_start());

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(uid);
    ics_event.summary(event.summary());
    ics_event.add_property("DTSTAMP", &start);
    ics_event.add_property("DTSTART", &start);
    ics_event.add_property("DTEND", &end);
    ics_event.description(&event.description);
    ics_event.location(&event.location);

    cal.push(ics_event.done());
    let cal = cal.done();

    strip_ics_bloat(&cal.to_string())
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
