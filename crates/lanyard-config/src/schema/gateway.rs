//! Subject and gateway connection settings.

use serde::{Deserialize, Serialize};

pub use lanyard_common::DEFAULT_GATEWAY_URL;

/// The user whose presence is tracked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectConfig {
    /// Opaque subject id. Empty means "not configured".
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub url: String,
    /// Upper bound on a single connect attempt (valid range: 1000-120000).
    pub connect_timeout_ms: u32,
    /// How long to wait for Hello after the socket opens (valid range: 1000-120000).
    pub hello_timeout_ms: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GATEWAY_URL.to_string(),
            connect_timeout_ms: 15_000,
            hello_timeout_ms: 10_000,
        }
    }
}
