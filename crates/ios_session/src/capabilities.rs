//! Capability set describing the target device, platform and application
//!
//! A capability set is built fresh for every session-creation call and
//! serialized into the new-session request. Keys are unique; inserting a
//! key twice replaces the earlier value.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

/// A single capability value: string, boolean or integer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapabilityValue {
    Str(String),
    Bool(bool),
    Int(i64),
}

impl From<&str> for CapabilityValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for CapabilityValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for CapabilityValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CapabilityValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for CapabilityValue {
    fn from(value: u64) -> Self {
        Self::Int(value as i64)
    }
}

/// Named capabilities for one new-session request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    entries: BTreeMap<String, CapabilityValue>,
}

impl CapabilitySet {
    /// Create an empty capability set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a capability, replacing any prior value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CapabilityValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a capability by key
    pub fn get(&self, key: &str) -> Option<&CapabilityValue> {
        self.entries.get(key)
    }

    /// Whether a capability with the given key is present
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of capabilities in the set
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no capabilities
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the capabilities in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CapabilityValue)> {
        self.entries.iter()
    }

    /// Build the new-session request body.
    ///
    /// The set is sent both as W3C `capabilities.alwaysMatch` and as
    /// legacy `desiredCapabilities` so that Appium 1.x hubs and current
    /// W3C endpoints both accept it.
    pub fn to_new_session_payload(&self) -> serde_json::Value {
        json!({
            "capabilities": {
                "alwaysMatch": self,
                "firstMatch": [{}],
            },
            "desiredCapabilities": self,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_prior_value() {
        let mut caps = CapabilitySet::new();
        caps.insert("deviceName", "iPhone 7");
        caps.insert("deviceName", "iPhone 8");

        assert_eq!(caps.len(), 1);
        assert_eq!(
            caps.get("deviceName"),
            Some(&CapabilityValue::Str("iPhone 8".to_string()))
        );
    }

    #[test]
    fn test_values_serialize_to_native_json_types() {
        let mut caps = CapabilitySet::new();
        caps.insert("platformName", "iOS");
        caps.insert("noReset", true);
        caps.insert("newCommandTimeout", 30000_i64);

        let value = serde_json::to_value(&caps).unwrap();
        assert_eq!(value["platformName"], "iOS");
        assert_eq!(value["noReset"], true);
        assert_eq!(value["newCommandTimeout"], 30000);
    }

    #[test]
    fn test_new_session_payload_carries_both_envelopes() {
        let mut caps = CapabilitySet::new();
        caps.insert("automationName", "XCUITest");

        let payload = caps.to_new_session_payload();
        assert_eq!(
            payload["capabilities"]["alwaysMatch"]["automationName"],
            "XCUITest"
        );
        assert_eq!(payload["desiredCapabilities"]["automationName"], "XCUITest");
    }

    #[test]
    fn test_empty_set() {
        let caps = CapabilitySet::new();
        assert!(caps.is_empty());
        assert!(!caps.contains("deviceName"));
    }
}
