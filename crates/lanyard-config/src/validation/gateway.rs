//! Gateway section validation.

use crate::schema::LanyardConfig;

use super::helpers::validate_range;

pub(super) fn validate_gateway(errors: &mut Vec<String>, config: &LanyardConfig) {
    let gateway = &config.gateway;

    if !(gateway.url.starts_with("ws://") || gateway.url.starts_with("wss://")) {
        errors.push(format!(
            "gateway.url = {:?} must use ws:// or wss://",
            gateway.url
        ));
    }

    validate_range(
        errors,
        "gateway.connect_timeout_ms",
        gateway.connect_timeout_ms,
        1_000,
        120_000,
    );
    validate_range(
        errors,
        "gateway.hello_timeout_ms",
        gateway.hello_timeout_ms,
        1_000,
        120_000,
    );
}
