//! Configuration module for ios_session
//!
//! This module contains:
//! - `device`: Typed device/application target configuration
//! - `timing`: Timing defaults for session bootstrap operations

mod device;
mod timing;

pub use device::{DeviceConfig, PlatformName};
pub use timing::{TimingConfig, TIMING_CONFIG};
