//! The submission store: one record list, its local cache and its remote.
//!
//! Writes are optimistic. A submitted record is appended and cached before
//! the remote has seen it, and stays even if the push fails. Reads from the
//! remote replace the whole list (last fetch wins, no merge).

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};

use crate::cache::{Cache, LocalCache};
use crate::error::{SyncError, ValidationError};
use crate::record::{Record, RecordKind, decode_rows};
use crate::remote::Remote;

/// Result of a submission that passed validation.
#[derive(Debug)]
pub struct Submission<R> {
    /// The record as appended to the local list.
    pub record: R,
    /// Outcome of the push. An error here does not undo the local write.
    pub sync: Result<(), SyncError>,
}

impl<R> Submission<R> {
    pub fn is_synced(&self) -> bool {
        self.sync.is_ok()
    }
}

pub struct SubmissionStore<R: Record> {
    records: Vec<R>,
    cache: LocalCache<R>,
    remote: Arc<dyn Remote>,
}

impl<R: Record> SubmissionStore<R> {
    /// Create an empty store. Call [`initialize`](Self::initialize) to load data.
    pub fn new(cache: Arc<dyn Cache>, remote: Arc<dyn Remote>) -> Self {
        SubmissionStore {
            records: Vec::new(),
            cache: LocalCache::new(cache),
            remote,
        }
    }

    pub fn kind(&self) -> RecordKind {
        R::KIND
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load the cached list, then try one refresh from the remote.
    ///
    /// If the refresh fails the cached list stays in place and the error is
    /// returned for reporting.
    pub async fn initialize(&mut self) -> Result<(), SyncError> {
        self.records = self.cache.restore();
        tracing::debug!(kind = %R::KIND, cached = self.records.len(), "restored from cache");

        self.refresh().await.map(|_| ())
    }

    /// Check `input` without touching the list, cache or remote.
    pub fn validate(input: &R::Input) -> Result<(), ValidationError> {
        R::from_input(input.clone(), Utc::now()).map(|_| ())
    }

    /// Validate, append and cache a new record, then push it.
    pub async fn submit(&mut self, input: R::Input) -> Result<Submission<R>, ValidationError> {
        let record = self.stage(input)?;
        let sync = self.push(&record).await;
        Ok(Submission { record, sync })
    }

    /// Validate `input` and append the resulting record locally, without
    /// contacting the remote.
    pub fn stage(&mut self, input: R::Input) -> Result<R, ValidationError> {
        self.stage_at(input, Utc::now())
    }

    fn stage_at(&mut self, input: R::Input, now: DateTime<Utc>) -> Result<R, ValidationError> {
        // Millisecond precision matches what the cache and remote keep
        let mut submitted_at = now.trunc_subsecs(3);
        if let Some(last) = self.records.last() {
            submitted_at = submitted_at.max(last.submitted_at());
        }

        let record = R::from_input(input, submitted_at)?;

        self.records.push(record.clone());
        self.cache.persist(&self.records);

        Ok(record)
    }

    /// Send one record to the remote. Local state is not touched.
    pub async fn push(&self, record: &R) -> Result<(), SyncError> {
        let value = serde_json::to_value(record)
            .map_err(|e| SyncError::Payload(format!("could not encode record: {e}")))?;

        let result = self.remote.push(R::KIND, &value).await;
        if let Err(ref e) = result {
            tracing::warn!(kind = %R::KIND, name = record.name(), error = %e, "push failed");
        }
        result
    }

    /// Replace the whole list with the remote copy. On failure nothing changes.
    ///
    /// Returns the new list length.
    pub async fn refresh(&mut self) -> Result<usize, SyncError> {
        let rows = self.remote.pull(R::KIND).await?;
        let records: Vec<R> = decode_rows(rows);

        tracing::debug!(
            kind = %R::KIND,
            previous = self.records.len(),
            pulled = records.len(),
            "replacing list with remote copy"
        );

        self.records = records;
        self.cache.persist(&self.records);

        Ok(self.records.len())
    }
}
