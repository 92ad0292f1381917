//! Error types for the rsvp tools.

use thiserror::Error;

/// Rejected submission input. Never reaches the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Submission rejected")]
    Spam,
}

/// Failure talking to the remote sheet endpoint.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Remote returned HTTP {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },

    #[error("Remote rejected the record: {0}")]
    Rejected(String),

    #[error("Invalid payload: {0}")]
    Payload(String),
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {m}"),
        None => String::new(),
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        SyncError::Transport(e.to_string())
    }
}

/// Failure reading or writing the local cache.
///
/// Only surfaces from the raw [`Cache`](crate::cache::Cache) trait; the typed
/// cache logs and swallows it.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

/// Errors that can occur in rsvp operations.
#[derive(Error, Debug)]
pub enum RsvpError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("Event details error: {0}")]
    Event(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for rsvp operations.
pub type RsvpResult<T> = Result<T, RsvpError>;
