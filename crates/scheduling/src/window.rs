//! Rounded time-window math for the activation job.

use chrono::{DateTime, Duration, Timelike, Utc};

/// The `[start, end)` window the activation job considers at `now`:
/// `now` floored to the start of its minute, extended by the configured
/// interval.
pub fn activation_window(
    now: DateTime<Utc>,
    interval_minutes: u32,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);
    let end = start + Duration::minutes(i64::from(interval_minutes.max(1)));
    (start, end)
}
