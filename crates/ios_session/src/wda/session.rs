//! Live session handle and lifecycle operations

use super::client::{unwrap_value, WdaClient};
use super::screenshot::Screenshot;
use crate::config::TIMING_CONFIG;
use crate::error::{Result, SessionError};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Handle to one live automation session.
///
/// The handle is exclusively owned by whoever created it. Teardown is
/// explicit: call [`DeviceSession::quit`] when done. Dropping an unquit
/// session only logs a warning; the endpoint side keeps running until
/// its idle command timeout expires.
#[derive(Debug)]
pub struct DeviceSession {
    client: WdaClient,
    session_id: String,
    implicit_wait_ms: AtomicU64,
    quit_done: AtomicBool,
}

impl DeviceSession {
    pub(crate) fn new(client: WdaClient, session_id: String, implicit_wait: Duration) -> Self {
        Self {
            client,
            session_id,
            implicit_wait_ms: AtomicU64::new(implicit_wait.as_millis() as u64),
            quit_done: AtomicBool::new(false),
        }
    }

    /// Identifier assigned by the endpoint
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The implicit element-lookup wait currently applied to the session
    pub fn implicit_wait(&self) -> Duration {
        Duration::from_millis(self.implicit_wait_ms.load(Ordering::Relaxed))
    }

    /// Apply a new implicit wait on the endpoint and record it.
    ///
    /// Both the W3C and legacy timeout body shapes are sent so either
    /// endpoint generation accepts the call.
    pub async fn set_implicit_wait(&self, wait: Duration) -> Result<()> {
        let ms = wait.as_millis() as u64;
        let body = json!({
            "implicit": ms,
            "type": "implicit",
            "ms": ms,
        });
        self.client
            .post_json(
                &format!("session/{}/timeouts", self.session_id),
                &body,
                TIMING_CONFIG.request_timeout(),
            )
            .await?;
        self.implicit_wait_ms.store(ms, Ordering::Relaxed);
        debug!(session_id = %self.session_id, implicit_wait_ms = ms, "implicit wait applied");
        Ok(())
    }

    /// Capture a screenshot of the session's screen
    pub async fn screenshot(&self) -> Result<Screenshot> {
        let body = self
            .client
            .get_json(&format!("session/{}/screenshot", self.session_id))
            .await?;
        let payload = unwrap_value(&body).as_str().ok_or_else(|| {
            SessionError::Protocol("screenshot response carries no base64 payload".to_string())
        })?;
        Screenshot::from_base64(payload)
    }

    /// End the session on the endpoint.
    ///
    /// Callers must invoke this; it is the only teardown path.
    pub async fn quit(&self) -> Result<()> {
        self.client
            .delete(&format!("session/{}", self.session_id))
            .await?;
        self.quit_done.store(true, Ordering::Relaxed);
        debug!(session_id = %self.session_id, "session quit");
        Ok(())
    }
}

impl Drop for DeviceSession {
    fn drop(&mut self) {
        if !self.quit_done.load(Ordering::Relaxed) {
            warn!(
                session_id = %self.session_id,
                "session dropped without quit(); endpoint keeps it until the command timeout"
            );
        }
    }
}
