//! JSON shapes exchanged with the sheet endpoint.
//!
//! `GET` returns the list, either bare or wrapped as `{"data": [...]}`.
//! `POST` takes `{"action": "create", "type"?: ..., "data": <record>}` and
//! answers `{"ok": bool, "error"?: string}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SyncError;
use crate::record::RecordKind;

/// Field some deployments wrap the list in.
pub const LIST_FIELD: &str = "data";

/// Fields only a golf row carries; used when a row has no `type`.
const GOLF_ONLY_FIELDS: &[&str] = &["handicap", "party_size", "pairing_pref"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
}

/// Body of a create request.
#[derive(Debug, Serialize)]
pub struct CreateRequest<'a> {
    pub action: Action,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub data: &'a Value,
}

impl<'a> CreateRequest<'a> {
    pub fn new(kind: RecordKind, data: &'a Value) -> Self {
        CreateRequest {
            action: Action::Create,
            kind: kind.type_param(),
            data,
        }
    }
}

/// Reply to a create request.
#[derive(Debug, Deserialize)]
pub struct CreateResponse {
    #[serde(default)]
    pub ok: bool,
    pub error: Option<String>,
}

/// Interpret the body of a successful create request.
///
/// An empty or non-JSON body counts as accepted. A JSON body must carry
/// `"ok": true`.
pub fn parse_create_response(body: &str) -> Result<(), SyncError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(());
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Ok(());
    };

    match serde_json::from_value::<CreateResponse>(value) {
        Ok(CreateResponse { ok: true, .. }) => Ok(()),
        Ok(CreateResponse { error, .. }) => Err(SyncError::Rejected(
            error.unwrap_or_else(|| "remote did not confirm the write".to_string()),
        )),
        Err(_) => Err(SyncError::Rejected(
            "unexpected reply to create request".to_string(),
        )),
    }
}

/// Pull the `error` message out of a failed response body, if it has one.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Unwrap the list from a `GET` payload. Anything that isn't an array (after
/// unwrapping `data`) is rejected.
pub fn parse_list_payload(value: Value) -> Result<Vec<Value>, SyncError> {
    match value {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut map) => match map.remove(LIST_FIELD) {
            Some(Value::Array(rows)) => Ok(rows),
            Some(_) => Err(SyncError::Payload(format!("'{LIST_FIELD}' is not an array"))),
            None => Err(SyncError::Payload("expected an array of records".to_string())),
        },
        other => Err(SyncError::Payload(format!(
            "expected an array of records, got {}",
            json_type(&other)
        ))),
    }
}

/// Keep only the rows that belong to `kind`.
///
/// The RSVP list is the remote's default and is taken as-is. Golf rows share
/// a sheet with RSVPs on some deployments, so anything not recognisably golf
/// is dropped.
pub fn filter_kind(kind: RecordKind, rows: Vec<Value>) -> Vec<Value> {
    match kind {
        RecordKind::Rsvp => rows,
        RecordKind::Golf => rows.into_iter().filter(is_golf_row).collect(),
    }
}

fn is_golf_row(row: &Value) -> bool {
    let Some(map) = row.as_object() else {
        return false;
    };

    match map.get("type") {
        Some(tag) => tag.as_str() == RecordKind::Golf.type_param(),
        None => GOLF_ONLY_FIELDS.iter().any(|field| map.contains_key(*field)),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
