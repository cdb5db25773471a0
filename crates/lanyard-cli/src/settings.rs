//! File config to client config.

use std::time::Duration;

use lanyard_client::{ClientConfig, RetryPolicy};
use lanyard_config::{LanyardConfig, RetryStrategy};

pub fn client_config(config: &LanyardConfig) -> ClientConfig {
    let retry = &config.retry;
    let base = Duration::from_millis(u64::from(retry.base_delay_ms));
    let policy = match retry.strategy {
        RetryStrategy::Fixed => RetryPolicy::Fixed(base),
        RetryStrategy::Exponential => RetryPolicy::Exponential {
            base,
            max: Duration::from_millis(u64::from(retry.max_delay_ms)),
            jitter: retry.jitter,
        },
    };

    ClientConfig {
        url: config.gateway.url.clone(),
        connect_timeout: Duration::from_millis(u64::from(config.gateway.connect_timeout_ms)),
        hello_timeout: Duration::from_millis(u64::from(config.gateway.hello_timeout_ms)),
        retry: policy,
        max_consecutive_failures: retry.max_consecutive_failures,
    }
}

/// The `--subject` flag wins over the config file.
pub fn resolve_subject(flag: Option<&str>, config: &LanyardConfig) -> String {
    flag.unwrap_or(&config.subject.id).trim().to_string()
}
