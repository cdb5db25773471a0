//! Retry section validation.

use crate::schema::LanyardConfig;

use super::helpers::{validate_range, validate_range_f64};

pub(super) fn validate_retry(errors: &mut Vec<String>, config: &LanyardConfig) {
    let retry = &config.retry;

    validate_range(errors, "retry.base_delay_ms", retry.base_delay_ms, 100, 600_000);
    validate_range(
        errors,
        "retry.max_delay_ms",
        retry.max_delay_ms,
        retry.base_delay_ms,
        3_600_000,
    );
    validate_range_f64(errors, "retry.jitter", retry.jitter, 0.0, 1.0);

    if retry.max_consecutive_failures == Some(0) {
        errors.push("retry.max_consecutive_failures must be at least 1 when set".to_string());
    }
}
