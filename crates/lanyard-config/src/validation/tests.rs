//! Tests for the full validation pipeline.

use super::*;
use crate::schema::LanyardConfig;

#[test]
fn default_config_validates() {
    let config = LanyardConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_non_websocket_url() {
    let mut config = LanyardConfig::default();
    config.gateway.url = "https://api.lanyard.rest/socket".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("gateway.url"));
}

#[test]
fn catches_connect_timeout_too_small() {
    let mut config = LanyardConfig::default();
    config.gateway.connect_timeout_ms = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("gateway.connect_timeout_ms"));
}

#[test]
fn catches_max_delay_below_base() {
    let mut config = LanyardConfig::default();
    config.retry.base_delay_ms = 10_000;
    config.retry.max_delay_ms = 5_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("retry.max_delay_ms"));
}

#[test]
fn catches_jitter_out_of_range() {
    let mut config = LanyardConfig::default();
    config.retry.jitter = -0.5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("retry.jitter"));
}

#[test]
fn catches_zero_failure_budget() {
    let mut config = LanyardConfig::default();
    config.retry.max_consecutive_failures = Some(0);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("max_consecutive_failures"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = LanyardConfig::default();
    config.gateway.hello_timeout_ms = 0;
    config.retry.jitter = 2.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("gateway.hello_timeout_ms"));
    assert!(err.contains("retry.jitter"));
    assert!(err.contains("; "));
}
