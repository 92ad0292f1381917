//! Colored terminal rendering for rsvp-core types.

use chrono::Local;
use owo_colors::OwoColorize;
use rsvp_core::event::Countdown;
use rsvp_core::record::{Attendance, GolfRecord, RsvpRecord};
use rsvp_core::summary::{GolfSummary, RsvpSummary};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Attendance {
    fn render(&self) -> String {
        match self {
            Attendance::Yes => "✓".green().to_string(),
            Attendance::Maybe => "?".yellow().to_string(),
            Attendance::No => "✗".red().to_string(),
        }
    }
}

impl Render for RsvpRecord {
    fn render(&self) -> String {
        let mut line = format!("{} {}", self.attending.render(), self.name.bold());

        if let Some(org) = &self.organization {
            line.push_str(&format!(" {}", format!("({org})").dimmed()));
        }
        if self.attending == Attendance::Yes && self.guests > 1 {
            line.push_str(&format!(" party of {}", self.guests));
        }
        line.push_str(&format!("  {}", submitted(&self.timestamp).dimmed()));

        if let Some(message) = &self.message {
            line.push_str(&format!("\n   \"{}\"", message.italic()));
        }

        line
    }
}

impl Render for GolfRecord {
    fn render(&self) -> String {
        let mut line = format!("⛳ {}", self.name.bold());

        if self.party_size > 1 {
            line.push_str(&format!(" party of {}", self.party_size));
        }
        if let Some(handicap) = &self.handicap {
            line.push_str(&format!(" {}", format!("hcp {handicap}").dimmed()));
        }
        line.push_str(&format!("  {}", submitted(&self.timestamp).dimmed()));

        if let Some(pref) = &self.pairing_pref {
            line.push_str(&format!("\n   pair with: {pref}"));
        }
        if let Some(notes) = &self.notes {
            line.push_str(&format!("\n   {}", notes.italic()));
        }

        line
    }
}

impl Render for RsvpSummary {
    fn render(&self) -> String {
        format!(
            "{} {}  {} {}  {} {}  {} {}  {} {}",
            "Responses".bold(),
            self.total,
            "Attending".bold(),
            self.attending.green(),
            "Maybe".bold(),
            self.maybe.yellow(),
            "Not attending".bold(),
            self.not_attending.red(),
            "Guests".bold(),
            self.total_guests,
        )
    }
}

impl Render for GolfSummary {
    fn render(&self) -> String {
        format!(
            "{} {}  {} {}",
            "Signups".bold(),
            self.signups,
            "Players".bold(),
            self.players.green(),
        )
    }
}

impl Render for Countdown {
    fn render(&self) -> String {
        match self {
            Countdown::Remaining { .. } => format!("⏳ {}", self.to_string().bold()),
            Countdown::Started => self.to_string().dimmed().to_string(),
        }
    }
}

fn submitted(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.with_timezone(&Local).format("%b %-d, %H:%M").to_string()
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> &str {
    if count == 1 { word } else { match word {
        "submission" => "submissions",
        "row" => "rows",
        _ => word,
    }}
}
