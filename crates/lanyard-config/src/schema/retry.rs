//! Reconnect policy settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RetryStrategy {
    /// Same delay after every failure.
    Fixed,
    /// Doubling delay, capped at `max_delay_ms`, with jitter.
    #[default]
    Exponential,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub strategy: RetryStrategy,
    /// First (and, for `fixed`, every) delay (valid range: 100-600000).
    pub base_delay_ms: u32,
    /// Cap for `exponential` (valid range: base_delay_ms-3600000).
    pub max_delay_ms: u32,
    /// Fraction of the delay randomized in either direction (0.0-1.0).
    pub jitter: f64,
    /// Give up after this many consecutive failed attempts. Unset retries forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_consecutive_failures: Option<u32>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            strategy: RetryStrategy::Exponential,
            base_delay_ms: 5_000,
            max_delay_ms: 60_000,
            jitter: 0.2,
            max_consecutive_failures: None,
        }
    }
}
