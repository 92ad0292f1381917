//! The remote, spreadsheet-backed source of truth.

mod http;
pub mod protocol;

pub use http::HttpRemote;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SyncError;
use crate::record::RecordKind;

/// Where records are pushed to and pulled from.
///
/// One attempt per call; retrying is up to the caller.
#[async_trait]
pub trait Remote: Send + Sync {
    /// Create one record remotely.
    async fn push(&self, kind: RecordKind, record: &Value) -> Result<(), SyncError>;

    /// Fetch the full remote list for `kind`, with rows of other kinds removed.
    async fn pull(&self, kind: RecordKind) -> Result<Vec<Value>, SyncError>;
}
