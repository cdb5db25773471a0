//! Reconnect delay policy.

use std::time::Duration;

use rand::Rng;

/// Flat retry delay, also the first step of the exponential policy.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Cap applied by the default exponential policy.
pub const DEFAULT_MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq)]
pub enum RetryPolicy {
    /// The same delay after every failure.
    Fixed(Duration),
    /// `base * 2^n`, capped at `max`, scaled by a random factor in
    /// `[1 - jitter, 1 + jitter]` (and capped again).
    Exponential {
        base: Duration,
        max: Duration,
        jitter: f64,
    },
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Exponential {
            base: DEFAULT_RETRY_DELAY,
            max: DEFAULT_MAX_RETRY_DELAY,
            jitter: 0.2,
        }
    }
}

/// Per-client backoff state. Reset after a successful handshake.
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: RetryPolicy,
    attempt: u32,
}

impl Backoff {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy, attempt: 0 }
    }

    /// Delay before the next attempt. Advances the attempt counter.
    pub fn next_delay(&mut self) -> Duration {
        let delay = match &self.policy {
            RetryPolicy::Fixed(delay) => *delay,
            RetryPolicy::Exponential { base, max, jitter } => {
                let raw = base
                    .saturating_mul(2u32.saturating_pow(self.attempt.min(20)))
                    .min(*max);
                apply_jitter(raw, *jitter).min(*max)
            }
        };
        self.attempt = self.attempt.saturating_add(1);
        delay
    }

    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}

/// Scale `delay` by a random factor. Non-finite jitter counts as none, and
/// an overflowing product saturates (the caller caps it).
fn apply_jitter(delay: Duration, jitter: f64) -> Duration {
    let jitter = if jitter.is_finite() {
        jitter.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if jitter == 0.0 {
        return delay;
    }
    let factor = 1.0 + rand::thread_rng().gen_range(-jitter..=jitter);
    Duration::try_from_secs_f64(delay.as_secs_f64() * factor.max(0.0)).unwrap_or(Duration::MAX)
}
