//! Core library for the rsvp tools.
//!
//! - `record`: RSVP and golf signup records and their wire format
//! - `store`: the submission store (optimistic local writes, wholesale remote refresh)
//! - `cache` / `remote`: the store's local and remote collaborators
//! - `csv`, `ics`, `event`: exports and event details

pub mod cache;
pub mod csv;
pub mod error;
pub mod event;
pub mod ics;
pub mod record;
pub mod remote;
pub mod settings;
pub mod store;
pub mod summary;

pub use error::{CacheError, RsvpError, RsvpResult, SyncError, ValidationError};
pub use record::{GolfRecord, Record, RecordKind, RsvpRecord};
pub use store::{Submission, SubmissionStore};
