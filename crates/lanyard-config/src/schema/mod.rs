//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod gateway;
mod logging;
mod retry;

pub use gateway::*;
pub use logging::*;
pub use retry::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanyardConfig {
    pub subject: SubjectConfig,
    pub gateway: GatewayConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}
