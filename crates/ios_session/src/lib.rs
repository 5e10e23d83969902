//! ios_session: session bootstrap for remote iOS UI-automation endpoints
//!
//! This library manages the lifecycle of UI-automation sessions against a
//! WebDriver-style endpoint (an Appium hub or a WebDriverAgent instance):
//! - Typed device/application configuration lowered to a capability set
//! - One-shot, fail-fast session creation with a default implicit wait
//! - Session handles with explicit teardown, screenshots and timeouts
//! - A per-thread slot for the current session
//!
//! # Example
//!
//! ```no_run
//! use ios_session::{DeviceConfig, SessionFactory};
//!
//! #[tokio::main]
//! async fn main() -> ios_session::Result<()> {
//!     let factory = SessionFactory::new("http://127.0.0.1:4723/wd/hub")?;
//!     let config = DeviceConfig::new("/tmp/UICatalog.app")
//!         .with_device_name("iPhone 7")
//!         .with_platform_version("12.1");
//!
//!     let session = factory.create_session(&config).await?;
//!     println!("session: {}", session.session_id());
//!     session.quit().await?;
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;

// Configuration
pub mod capabilities;
pub mod config;

// Endpoint plumbing and session handles
pub mod wda;

// Core functionality
pub mod factory;
pub mod holder;

// Re-export commonly used types
pub use error::{Result, SessionError};

// Config re-exports
pub use capabilities::{CapabilitySet, CapabilityValue};
pub use config::{DeviceConfig, PlatformName, TimingConfig, TIMING_CONFIG};

// Endpoint re-exports
pub use wda::{DeviceSession, EndpointStatus, Screenshot, WdaClient};

// Factory and holder re-exports
pub use factory::SessionFactory;
pub use holder::SessionHolder;
