//! Screenshot payload decoding
//!
//! The endpoint returns screenshots as base64-encoded PNG data. The raw
//! payload is kept around so callers can forward it without re-encoding.

use crate::error::Result;
use base64::{engine::general_purpose, Engine as _};
use tracing::debug;

/// A screenshot captured through the automation endpoint
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub base64_data: String,
    pub width: u32,
    pub height: u32,
}

impl Screenshot {
    /// Decode an endpoint screenshot payload.
    ///
    /// Some endpoints wrap the base64 body across lines; whitespace is
    /// stripped before decoding.
    pub fn from_base64(data: &str) -> Result<Self> {
        let compact: String = data.split_whitespace().collect();
        let bytes = general_purpose::STANDARD.decode(compact.as_bytes())?;
        let img = image::load_from_memory(&bytes)?;

        let width = img.width();
        let height = img.height();
        debug!(width, height, "decoded screenshot");

        Ok(Self {
            base64_data: compact,
            width,
            height,
        })
    }

    /// The decoded PNG bytes
    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        Ok(general_purpose::STANDARD.decode(self.base64_data.as_bytes())?)
    }
}
