//! Session factory: builds ready-to-use device sessions from validated
//! configuration
//!
//! Creation is fail-fast and one-shot: configuration problems surface
//! before any network traffic, endpoint problems surface immediately,
//! and nothing is retried.

use crate::config::{DeviceConfig, TIMING_CONFIG};
use crate::error::Result;
use crate::wda::{extract_session_id, DeviceSession, EndpointStatus, WdaClient};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Factory for device sessions against one automation endpoint
#[derive(Debug, Clone)]
pub struct SessionFactory {
    client: WdaClient,
}

impl SessionFactory {
    /// Create a factory for the given endpoint URL
    /// (e.g. `http://127.0.0.1:4723/wd/hub`)
    pub fn new(endpoint: &str) -> Result<Self> {
        Ok(Self {
            client: WdaClient::new(endpoint)?,
        })
    }

    /// The endpoint this factory creates sessions against
    pub fn endpoint(&self) -> &Url {
        self.client.endpoint()
    }

    /// Open a new session for the configured device and application.
    ///
    /// The configuration is validated first; a missing app bundle fails
    /// with `InvalidCapability` before any network call. On success the
    /// default implicit wait is applied to the session before it is
    /// returned. If applying the wait fails, the half-open session is
    /// deleted best-effort and the error propagates.
    pub async fn create_session(&self, config: &DeviceConfig) -> Result<DeviceSession> {
        config.validate()?;

        let payload = config.capabilities().to_new_session_payload();
        debug!(endpoint = %self.client.endpoint(), device = %config.device_name, "creating session");

        let body = self
            .client
            .post_json("session", &payload, TIMING_CONFIG.create_session_timeout())
            .await?;
        let session_id = extract_session_id(&body)?;
        debug!(%session_id, "session created");

        let session = DeviceSession::new(self.client.clone(), session_id, Duration::ZERO);
        if let Err(e) = session.set_implicit_wait(TIMING_CONFIG.implicit_wait()).await {
            warn!(session_id = %session.session_id(), "implicit wait failed, deleting session");
            if let Err(cleanup) = session.quit().await {
                warn!(session_id = %session.session_id(), %cleanup, "cleanup delete failed");
            }
            return Err(e);
        }
        Ok(session)
    }

    /// Rebind to a session that already exists on the endpoint.
    ///
    /// No creation call is made and the endpoint is not probed; the
    /// recorded implicit wait starts at zero until one is applied.
    pub fn attach(&self, session_id: impl Into<String>) -> DeviceSession {
        DeviceSession::new(self.client.clone(), session_id.into(), Duration::ZERO)
    }

    /// Probe the endpoint's status resource
    pub async fn status(&self) -> Result<EndpointStatus> {
        self.client.status().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;

    #[test]
    fn test_rejects_malformed_endpoint() {
        let err = SessionFactory::new("::not-a-url::").unwrap_err();
        assert!(matches!(err, SessionError::InvalidCapability(_)));
    }

    #[test]
    fn test_endpoint_accessor() {
        let factory = SessionFactory::new("http://127.0.0.1:4723/wd/hub").unwrap();
        assert_eq!(factory.endpoint().as_str(), "http://127.0.0.1:4723/wd/hub");
    }

    #[test]
    fn test_attach_binds_session_id() {
        let factory = SessionFactory::new("http://127.0.0.1:4723/wd/hub").unwrap();
        let session = factory.attach("existing-id");
        assert_eq!(session.session_id(), "existing-id");
        assert_eq!(session.implicit_wait(), Duration::ZERO);
    }
}
