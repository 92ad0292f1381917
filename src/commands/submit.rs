use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::record::{GolfInput, RsvpInput};
use rsvp_core::settings::RsvpConfig;
use rsvp_core::{GolfRecord, Record, RsvpRecord, Submission, SubmissionStore};

use super::load_store;

pub async fn rsvp(config: &RsvpConfig, input: RsvpInput) -> Result<()> {
    SubmissionStore::<RsvpRecord>::validate(&input)?;

    let mut store = load_store::<RsvpRecord>(config).await?;
    let submission = store.submit(input).await?;
    let record = &submission.record;

    println!(
        "{} Thanks, {}! Your RSVP ({}) was recorded.",
        "✓".green(),
        record.name.bold(),
        record.attending
    );
    report_sync(&submission);

    Ok(())
}

pub async fn golf(config: &RsvpConfig, input: GolfInput) -> Result<()> {
    SubmissionStore::<GolfRecord>::validate(&input)?;

    let mut store = load_store::<GolfRecord>(config).await?;
    let submission = store.submit(input).await?;
    let record = &submission.record;

    println!(
        "{} Thanks, {}! Golf signup for a party of {} was recorded.",
        "✓".green(),
        record.name.bold(),
        record.party_size
    );
    report_sync(&submission);

    Ok(())
}

/// The record is kept locally either way; only say whether it reached the sheet.
fn report_sync<R: Record>(submission: &Submission<R>) {
    match &submission.sync {
        Ok(()) => println!("   {}", "Saved to the shared sheet".dimmed()),
        Err(e) => println!(
            "   {}",
            format!("Saved locally, but not synced: {e}").yellow()
        ),
    }
}
