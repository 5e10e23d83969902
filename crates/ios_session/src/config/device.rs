//! Typed device/application target configuration
//!
//! Replaces the ad hoc key/value literals of a raw capability map with
//! named, typed options that are validated before any network traffic.

use crate::capabilities::CapabilitySet;
use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Target platform reported to the automation endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformName {
    #[default]
    #[serde(rename = "iOS")]
    Ios,
    // Android targets go through a different endpoint stack and are not
    // supported by this crate.
}

impl fmt::Display for PlatformName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ios => write!(f, "iOS"),
        }
    }
}

/// Configuration for the device, platform and application under test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub device_name: String,
    pub platform_version: String,
    pub platform_name: PlatformName,
    /// Host platform family of the automation endpoint
    pub platform_family: String,
    pub automation_name: String,
    /// Endpoint protocol version advertised in the capability set
    pub appium_version: String,
    pub auto_accept_alerts: bool,
    pub no_reset: bool,
    /// Path to the local application bundle (.app)
    pub app_path: PathBuf,
    /// Idle timeout after which the endpoint discards the session (milliseconds)
    pub new_command_timeout_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_name: "iPhone 7".to_string(),
            platform_version: "12.1".to_string(),
            platform_name: PlatformName::Ios,
            platform_family: "MAC".to_string(),
            automation_name: "XCUITest".to_string(),
            appium_version: "1.10.1".to_string(),
            auto_accept_alerts: false,
            no_reset: true,
            app_path: PathBuf::new(),
            new_command_timeout_ms: 30000,
        }
    }
}

impl DeviceConfig {
    /// Create a config for the given application bundle with default
    /// device settings
    pub fn new(app_path: impl Into<PathBuf>) -> Self {
        Self {
            app_path: app_path.into(),
            ..Default::default()
        }
    }

    /// Set the device name
    pub fn with_device_name(mut self, device_name: impl Into<String>) -> Self {
        self.device_name = device_name.into();
        self
    }

    /// Set the platform version
    pub fn with_platform_version(mut self, platform_version: impl Into<String>) -> Self {
        self.platform_version = platform_version.into();
        self
    }

    /// Set the automation engine name
    pub fn with_automation_name(mut self, automation_name: impl Into<String>) -> Self {
        self.automation_name = automation_name.into();
        self
    }

    /// Set whether system alerts are accepted automatically
    pub fn with_auto_accept_alerts(mut self, auto_accept_alerts: bool) -> Self {
        self.auto_accept_alerts = auto_accept_alerts;
        self
    }

    /// Set whether application state is kept between sessions
    pub fn with_no_reset(mut self, no_reset: bool) -> Self {
        self.no_reset = no_reset;
        self
    }

    /// Set the idle command timeout in milliseconds
    pub fn with_new_command_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.new_command_timeout_ms = timeout_ms;
        self
    }

    /// Validate the configuration before it is sent anywhere.
    ///
    /// The application bundle must exist on disk; device name and
    /// platform version must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.app_path.as_os_str().is_empty() {
            return Err(SessionError::InvalidCapability(
                "app path is not set".to_string(),
            ));
        }
        if !self.app_path.exists() {
            return Err(SessionError::InvalidCapability(format!(
                "app path does not exist: {}",
                self.app_path.display()
            )));
        }
        if self.device_name.trim().is_empty() {
            return Err(SessionError::InvalidCapability(
                "device name is empty".to_string(),
            ));
        }
        if self.platform_version.trim().is_empty() {
            return Err(SessionError::InvalidCapability(
                "platform version is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Lower the configuration into the capability set sent to the
    /// endpoint
    pub fn capabilities(&self) -> CapabilitySet {
        let mut caps = CapabilitySet::new();
        caps.insert("deviceName", self.device_name.as_str());
        caps.insert("platformVersion", self.platform_version.as_str());
        caps.insert("platformName", self.platform_name.to_string());
        caps.insert("platform", self.platform_family.as_str());
        caps.insert("automationName", self.automation_name.as_str());
        caps.insert("appium-version", self.appium_version.as_str());
        caps.insert("autoAcceptAlerts", self.auto_accept_alerts);
        caps.insert("noReset", self.no_reset);
        caps.insert("app", absolute_path_string(&self.app_path));
        caps.insert("newCommandTimeout", self.new_command_timeout_ms);
        caps
    }
}

/// Absolute form of the bundle path when it resolves, the configured
/// path otherwise
fn absolute_path_string(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_config_default() {
        let config = DeviceConfig::default();
        assert_eq!(config.device_name, "iPhone 7");
        assert_eq!(config.platform_version, "12.1");
        assert_eq!(config.platform_name, PlatformName::Ios);
        assert_eq!(config.automation_name, "XCUITest");
        assert!(!config.auto_accept_alerts);
        assert!(config.no_reset);
        assert_eq!(config.new_command_timeout_ms, 30000);
    }

    #[test]
    fn test_device_config_builder() {
        let config = DeviceConfig::new("/tmp/App.app")
            .with_device_name("iPhone 8")
            .with_platform_version("13.0")
            .with_auto_accept_alerts(true)
            .with_new_command_timeout_ms(60000);

        assert_eq!(config.app_path, PathBuf::from("/tmp/App.app"));
        assert_eq!(config.device_name, "iPhone 8");
        assert_eq!(config.platform_version, "13.0");
        assert!(config.auto_accept_alerts);
        assert_eq!(config.new_command_timeout_ms, 60000);
    }

    #[test]
    fn test_validate_rejects_missing_app_path() {
        let config = DeviceConfig::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SessionError::InvalidCapability(_)));

        let config = DeviceConfig::new("/definitely/not/here/App.app");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SessionError::InvalidCapability(_)));
    }

    #[test]
    fn test_validate_rejects_empty_device_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = DeviceConfig::new(dir.path()).with_device_name("  ");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SessionError::InvalidCapability(_)));
    }

    #[test]
    fn test_capabilities_lowering() {
        let dir = tempfile::tempdir().unwrap();
        let config = DeviceConfig::new(dir.path());
        let caps = config.capabilities();

        assert_eq!(
            caps.get("deviceName"),
            Some(&"iPhone 7".into())
        );
        assert_eq!(caps.get("platformName"), Some(&"iOS".into()));
        assert_eq!(caps.get("noReset"), Some(&true.into()));
        assert_eq!(caps.get("newCommandTimeout"), Some(&30000_i64.into()));
        assert!(caps.contains("app"));
        assert!(caps.contains("appium-version"));
    }

    #[test]
    fn test_platform_name_serializes_as_ios() {
        let json = serde_json::to_string(&PlatformName::Ios).unwrap();
        assert_eq!(json, "\"iOS\"");
    }
}
