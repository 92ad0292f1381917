use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use owo_colors::OwoColorize;
use rsvp_core::event::EventDetails;
use rsvp_core::ics::generate_ics;
use rsvp_core::settings::RsvpConfig;
use uuid::Uuid;

use crate::render::Render;

fn require_event(config: &RsvpConfig) -> Result<EventDetails> {
    config.event_details()?.ok_or_else(|| {
        anyhow::anyhow!(
            "No event start time configured.\n\n\
            Add one to the [event] table in config.toml:\n  \
            start = \"2025-10-18T18:00:00-07:00\""
        )
    })
}

pub fn ics(config: &RsvpConfig, output: Option<PathBuf>) -> Result<()> {
    let event = require_event(config)?;
    let uid = format!("{}@rsvp", Uuid::new_v4());
    let content = generate_ics(&event, &uid);

    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Could not write {}", path.display()))?;
            println!("{} Saved {}", "✓".green(), path.display());
        }
        None => print!("{content}"),
    }

    Ok(())
}

pub fn calendar_link(config: &RsvpConfig) -> Result<()> {
    println!("{}", require_event(config)?.calendar_link());
    Ok(())
}

pub fn countdown(config: &RsvpConfig) -> Result<()> {
    let event = require_event(config)?;
    println!("{}", event.countdown(Utc::now()).render());
    Ok(())
}
