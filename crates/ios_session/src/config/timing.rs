//! Timing configuration for session bootstrap operations

use lazy_static::lazy_static;
use std::env;
use std::time::Duration;

/// Timing defaults applied during session bootstrap
#[derive(Debug, Clone)]
pub struct TimingConfig {
    /// Implicit element-lookup wait applied to every new session (seconds)
    pub implicit_wait_secs: u64,
    /// Upper bound on the new-session round trip (seconds)
    pub create_session_timeout_secs: u64,
    /// Upper bound on every other endpoint request (seconds)
    pub request_timeout_secs: u64,
}

impl TimingConfig {
    /// Implicit wait as a [`Duration`]
    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_secs)
    }

    /// Session-creation timeout as a [`Duration`]
    pub fn create_session_timeout(&self) -> Duration {
        Duration::from_secs(self.create_session_timeout_secs)
    }

    /// Per-request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            implicit_wait_secs: env::var("IOS_SESSION_IMPLICIT_WAIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            create_session_timeout_secs: env::var("IOS_SESSION_CREATE_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
            request_timeout_secs: env::var("IOS_SESSION_REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}

lazy_static! {
    /// Global timing configuration instance
    pub static ref TIMING_CONFIG: TimingConfig = TimingConfig::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_defaults() {
        let timing = TimingConfig::default();
        assert_eq!(timing.implicit_wait(), Duration::from_secs(15));
        assert_eq!(timing.request_timeout(), Duration::from_secs(30));
    }
}
