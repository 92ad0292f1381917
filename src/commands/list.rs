use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::settings::RsvpConfig;
use rsvp_core::summary::{GolfSummary, RsvpSummary, sorted_for_display};
use rsvp_core::{GolfRecord, RsvpRecord};

use super::load_store;
use crate::render::Render;

pub async fn rsvps(config: &RsvpConfig) -> Result<()> {
    let store = load_store::<RsvpRecord>(config).await?;
    let records = store.records();

    println!("{}", RsvpSummary::from_records(records).render());

    if records.is_empty() {
        println!("{}", "No RSVPs yet.".dimmed());
        return Ok(());
    }

    println!();
    for record in sorted_for_display(records) {
        println!("{}", record.render());
    }

    Ok(())
}

pub async fn golf(config: &RsvpConfig) -> Result<()> {
    let store = load_store::<GolfRecord>(config).await?;
    let records = store.records();

    println!("{}", GolfSummary::from_records(records).render());

    if records.is_empty() {
        println!("{}", "No golf signups yet.".dimmed());
        return Ok(());
    }

    println!();
    for record in records {
        println!("{}", record.render());
    }

    Ok(())
}
