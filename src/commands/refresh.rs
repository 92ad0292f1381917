use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use rsvp_core::settings::RsvpConfig;
use rsvp_core::{GolfRecord, Record, RsvpRecord};

use super::open_store;
use crate::render::pluralize;

pub async fn run(config: &RsvpConfig, golf: bool) -> Result<()> {
    if golf {
        refresh::<GolfRecord>(config).await
    } else {
        refresh::<RsvpRecord>(config).await
    }
}

async fn refresh<R: Record>(config: &RsvpConfig) -> Result<()> {
    let mut store = open_store::<R>(config)?;

    let count = store
        .refresh()
        .await
        .with_context(|| format!("Could not refresh {} list", R::KIND))?;

    println!(
        "{} Fetched {} {} {}",
        "✓".green(),
        count,
        R::KIND,
        pluralize("submission", count)
    );

    Ok(())
}
