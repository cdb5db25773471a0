//! Client configuration and the state published to subscribers.

use std::sync::Arc;
use std::time::Duration;

use crate::backoff::RetryPolicy;
use crate::snapshot::PresenceSnapshot;

pub use lanyard_common::DEFAULT_GATEWAY_URL;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub url: String,
    /// Upper bound on a single connect attempt.
    pub connect_timeout: Duration,
    /// How long an open socket may go without a Hello before it is dropped.
    pub hello_timeout: Duration,
    pub retry: RetryPolicy,
    /// Consecutive attempts that fail before subscribing, after which the
    /// client stops retrying. `None` retries forever.
    pub max_consecutive_failures: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GATEWAY_URL.to_string(),
            connect_timeout: Duration::from_secs(15),
            hello_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            max_consecutive_failures: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Published state
// ---------------------------------------------------------------------------

/// What subscribers see. Cloning is cheap; the snapshot is shared.
#[derive(Debug, Clone, Default)]
pub struct PresenceState {
    /// Latest snapshot, `None` until the first `INIT_STATE` arrives.
    pub snapshot: Option<Arc<PresenceSnapshot>>,
    /// Whether a socket is currently open. Show a placeholder when false.
    pub connected: bool,
    /// The failure budget ran out; the client will not reconnect.
    pub exhausted: bool,
}
