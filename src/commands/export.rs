use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use rsvp_core::csv::to_csv;
use rsvp_core::settings::RsvpConfig;
use rsvp_core::{GolfRecord, Record, RsvpRecord};

use super::load_store_reporting;
use crate::render::pluralize;

pub async fn run(config: &RsvpConfig, golf: bool, output: Option<PathBuf>) -> Result<()> {
    let (csv, rows) = if golf {
        export::<GolfRecord>(config, &mut std::io::stderr()).await?
    } else {
        export::<RsvpRecord>(config, &mut std::io::stderr()).await?
    };

    match output {
        Some(path) => {
            std::fs::write(&path, csv)
                .with_context(|| format!("Could not write {}", path.display()))?;
            println!(
                "{} Exported {} {} to {}",
                "✓".green(),
                rows,
                pluralize("row", rows),
                path.display()
            );
        }
        None => print!("{csv}"),
    }

    Ok(())
}

/// CSV for the current list. Warnings go to `warnings`, never into the CSV.
async fn export<R: Record>(
    config: &RsvpConfig,
    warnings: &mut impl Write,
) -> Result<(String, usize)> {
    let store = load_store_reporting::<R>(config, warnings).await?;

    if store.is_empty() {
        anyhow::bail!("No data to export");
    }

    Ok((to_csv(store.records()), store.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Utc;
    use rsvp_core::cache::{FileCache, LocalCache};
    use rsvp_core::record::RsvpInput;

    use crate::commands::test_support::unreachable_config;

    #[tokio::test]
    async fn offline_export_keeps_warning_out_of_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config = unreachable_config(dir.path());
        let cached = RsvpRecord::from_input(
            RsvpInput {
                name: "Ann".to_string(),
                email: "ann@x.com".to_string(),
                attending: "yes".to_string(),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap();
        LocalCache::<RsvpRecord>::new(Arc::new(FileCache::new(config.cache_path())))
            .persist(&[cached]);

        let mut warnings = Vec::new();
        let (csv, rows) = export::<RsvpRecord>(&config, &mut warnings).await.unwrap();

        assert_eq!(rows, 1);
        assert!(csv.starts_with("name,email,"), "{csv}");
        assert!(!csv.contains("Could not refresh"));
        let warnings = String::from_utf8(warnings).unwrap();
        assert!(warnings.contains("showing cached copy"), "{warnings}");
    }

    #[tokio::test]
    async fn empty_list_has_nothing_to_export() {
        let dir = tempfile::tempdir().unwrap();
        let config = unreachable_config(dir.path());

        let err = export::<RsvpRecord>(&config, &mut Vec::new()).await.unwrap_err();

        assert_eq!(err.to_string(), "No data to export");
    }
}
