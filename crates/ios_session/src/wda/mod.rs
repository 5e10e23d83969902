//! WebDriver-style automation endpoint plumbing
//!
//! This module provides:
//! - `client`: HTTP transport to the endpoint (opaque wire calls)
//! - `session`: Live session handle and lifecycle operations
//! - `screenshot`: Screenshot payload decoding

mod client;
mod screenshot;
mod session;

pub use client::{EndpointStatus, WdaClient};
pub(crate) use client::extract_session_id;
pub use screenshot::Screenshot;
pub use session::DeviceSession;
