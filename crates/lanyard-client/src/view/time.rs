use chrono::Utc;

use crate::snapshot::TimeRange;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// `"1h 5m elapsed"`, or `"5m elapsed"` under an hour. Clock skew that puts
/// `start_ms` in the future reads as zero.
pub fn format_elapsed(start_ms: i64, now_ms: i64) -> String {
    let elapsed = now_ms.saturating_sub(start_ms).max(0);
    let hours = elapsed / HOUR_MS;
    let minutes = (elapsed % HOUR_MS) / MINUTE_MS;
    if hours > 0 {
        format!("{hours}h {minutes}m elapsed")
    } else {
        format!("{minutes}m elapsed")
    }
}

/// Fraction of `range` that has played at `now_ms`, clamped to `[0, 1]`.
/// `None` unless both ends are known and the range is non-empty.
pub fn playback_progress(range: &TimeRange, now_ms: i64) -> Option<f64> {
    let (start, end) = (i128::from(range.start?), i128::from(range.end?));
    if end <= start {
        return None;
    }
    let progress = (i128::from(now_ms) - start) as f64 / (end - start) as f64;
    Some(progress.clamp(0.0, 1.0))
}
