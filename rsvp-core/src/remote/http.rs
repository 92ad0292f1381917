//! HTTP client for the sheet endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde_json::Value;
use url::Url;

use super::Remote;
use super::protocol::{self, CreateRequest};
use crate::error::{RsvpError, RsvpResult, SyncError};
use crate::record::RecordKind;

/// [`Remote`] backed by a single web-app URL.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpRemote {
    pub fn new(endpoint: &str, timeout: Duration) -> RsvpResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| RsvpError::Config(format!("Invalid endpoint '{endpoint}': {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RsvpError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpRemote { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn list_url(&self, kind: RecordKind) -> Url {
        let mut url = self.endpoint.clone();
        if let Some(kind) = kind.type_param() {
            url.query_pairs_mut().append_pair("type", kind);
        }
        url
    }
}

/// Read the body, turning a non-success status into a [`SyncError`].
async fn success_body(resp: Response) -> Result<String, SyncError> {
    let status: StatusCode = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(SyncError::Status {
            status: status.as_u16(),
            message: protocol::error_message(&body),
        });
    }

    Ok(body)
}

#[async_trait]
impl Remote for HttpRemote {
    async fn push(&self, kind: RecordKind, record: &Value) -> Result<(), SyncError> {
        tracing::debug!(%kind, endpoint = %self.endpoint, "pushing record");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&CreateRequest::new(kind, record))
            .send()
            .await?;

        let body = success_body(resp).await?;
        protocol::parse_create_response(&body)
    }

    async fn pull(&self, kind: RecordKind) -> Result<Vec<Value>, SyncError> {
        let url = self.list_url(kind);
        tracing::debug!(%kind, %url, "pulling records");

        let resp = self.http.get(url).send().await?;
        let body = success_body(resp).await?;

        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| SyncError::Payload(format!("response is not JSON: {e}")))?;
        let rows = protocol::parse_list_payload(payload)?;

        Ok(protocol::filter_kind(kind, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golf_list_url_carries_type_query() {
        let remote = HttpRemote::new(
            "https://script.example.com/macros/s/abc/exec",
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            remote.list_url(RecordKind::Rsvp).as_str(),
            "https://script.example.com/macros/s/abc/exec"
        );
        assert_eq!(
            remote.list_url(RecordKind::Golf).as_str(),
            "https://script.example.com/macros/s/abc/exec?type=golf"
        );
    }

    #[test]
    fn rejects_invalid_endpoint() {
        assert!(matches!(
            HttpRemote::new("not a url", Duration::from_secs(5)),
            Err(RsvpError::Config(_))
        ));
    }
}
