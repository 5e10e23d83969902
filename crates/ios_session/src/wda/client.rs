//! HTTP transport to the automation endpoint
//!
//! The wire protocol is an external collaborator: this client performs a
//! handful of opaque JSON calls and maps transport failures onto the
//! crate error kinds. No call is retried.

use crate::config::TIMING_CONFIG;
use crate::error::{Result, SessionError};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Health information reported by the endpoint's status resource
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointStatus {
    #[serde(default = "default_ready")]
    pub ready: bool,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_ready() -> bool {
    // Appium 1.x /status has no ready field; reaching it at all means up
    true
}

/// Client for one automation endpoint (e.g. `http://127.0.0.1:4723/wd/hub`)
#[derive(Debug, Clone)]
pub struct WdaClient {
    base: Url,
    http: reqwest::Client,
}

impl WdaClient {
    /// Create a client for the given endpoint URL
    pub fn new(endpoint: &str) -> Result<Self> {
        let base = Url::parse(endpoint).map_err(|e| {
            SessionError::InvalidCapability(format!("malformed endpoint URL {}: {}", endpoint, e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SessionError::InvalidCapability(format!(
                "unsupported endpoint scheme: {}",
                base.scheme()
            )));
        }
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SessionError::Connection(e.to_string()))?;
        Ok(Self { base, http })
    }

    /// The endpoint this client talks to
    pub fn endpoint(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// POST a JSON body and return the parsed response body
    pub async fn post_json(&self, path: &str, body: &Value, timeout: Duration) -> Result<Value> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        Self::read_json(response).await
    }

    /// GET a JSON resource
    pub async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .timeout(TIMING_CONFIG.request_timeout())
            .send()
            .await
            .map_err(transport_error)?;
        Self::read_json(response).await
    }

    /// DELETE a resource
    pub async fn delete(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        let response = self
            .http
            .delete(&url)
            .timeout(TIMING_CONFIG.request_timeout())
            .send()
            .await
            .map_err(transport_error)?;
        Self::read_json(response).await
    }

    /// Fetch the endpoint status resource
    pub async fn status(&self) -> Result<EndpointStatus> {
        let body = self.get_json("status").await?;
        let value = unwrap_value(&body);
        let status = serde_json::from_value(value.clone())
            .unwrap_or(EndpointStatus { ready: true, message: None });
        Ok(status)
    }

    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(SessionError::Connection(format!(
                "endpoint answered {}: {}",
                status,
                truncate(&text, 300)
            )));
        }
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            SessionError::Protocol(format!(
                "invalid JSON from endpoint: {} ({})",
                e,
                truncate(&text, 300)
            ))
        })
    }
}

/// Extract the `value` member of a WebDriver response envelope
pub(crate) fn unwrap_value(body: &Value) -> &Value {
    body.get("value").unwrap_or(body)
}

/// Pull the session identifier out of a new-session response.
///
/// Accepts both the legacy top-level `sessionId` and the W3C
/// `value.sessionId` shapes.
pub(crate) fn extract_session_id(body: &Value) -> Result<String> {
    let candidate = body
        .get("sessionId")
        .or_else(|| body.get("value").and_then(|v| v.get("sessionId")));
    match candidate.and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(SessionError::Protocol(format!(
            "new-session response carries no session id: {}",
            truncate(&body.to_string(), 300)
        ))),
    }
}

fn transport_error(e: reqwest::Error) -> SessionError {
    if e.is_timeout() {
        SessionError::Connection(format!("endpoint timed out: {}", e))
    } else if e.is_connect() || e.is_request() {
        SessionError::Connection(e.to_string())
    } else {
        SessionError::Protocol(e.to_string())
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
