pub mod config;
pub mod event;
pub mod export;
pub mod list;
pub mod refresh;
pub mod submit;

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::cache::FileCache;
use rsvp_core::remote::HttpRemote;
use rsvp_core::settings::RsvpConfig;
use rsvp_core::{Record, SubmissionStore};

/// Build a store backed by the configured cache directory and endpoint.
pub fn open_store<R: Record>(config: &RsvpConfig) -> Result<SubmissionStore<R>> {
    let remote = HttpRemote::new(config.endpoint()?, config.request_timeout())?;
    let cache = FileCache::new(config.cache_path());
    tracing::debug!(
        kind = %R::KIND,
        endpoint = %remote.endpoint(),
        cache = %cache.dir().display(),
        "opening store"
    );

    Ok(SubmissionStore::new(Arc::new(cache), Arc::new(remote)))
}

/// Open and initialize a store. A failed refresh is reported on stderr and
/// the cached list is used instead.
pub async fn load_store<R: Record>(config: &RsvpConfig) -> Result<SubmissionStore<R>> {
    load_store_reporting(config, &mut std::io::stderr()).await
}

/// [`load_store`], writing refresh warnings to `warnings`.
pub async fn load_store_reporting<R: Record>(
    config: &RsvpConfig,
    warnings: &mut impl Write,
) -> Result<SubmissionStore<R>> {
    let mut store = open_store(config)?;

    if let Err(e) = store.initialize().await {
        writeln!(
            warnings,
            "{}",
            format!("Could not refresh {} list ({e}), showing cached copy", R::KIND).yellow()
        )?;
    }

    Ok(store)
}
