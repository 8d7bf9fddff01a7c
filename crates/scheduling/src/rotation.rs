//! Cyclic prompt rotation.
//!
//! Counts fixed-length intervals from a base time and maps the count,
//! modulo the prompt total, onto the ordered prompt list. The mapping is
//! a pure function of its inputs: clients poll it every 30 seconds and
//! re-derive time-left locally, so repeated calls with the same inputs
//! must return identical windows.

use chrono::{DateTime, Duration, Utc};

/// Milliseconds per rotation-interval minute.
pub const MS_PER_MINUTE: i64 = 60_000;

/// The rotation slot computed for a single instant.
///
/// `index` is `-1` when the prompt list is empty (then both bounds equal
/// the query time); otherwise it is the cyclic position in
/// `[0, total_prompts)`, `interval_start <= now < interval_end`, and the
/// window is exactly `interval_minutes` wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationWindow {
    pub index: i64,
    pub interval_start: DateTime<Utc>,
    pub interval_end: DateTime<Utc>,
}

impl RotationWindow {
    /// The selected prompt position, if any.
    pub fn slot(&self) -> Option<usize> {
        if self.index >= 0 {
            Some(self.index as usize)
        } else {
            None
        }
    }
}

/// Select the prompt live at `now`.
///
/// Interval counting uses floor division and euclidean modulo, so times
/// before `base_time` produce negative interval counts that cycle
/// backward through the list instead of collapsing onto index 0. The
/// window invariant holds on both sides of the base time.
pub fn rotation_window(
    now: DateTime<Utc>,
    base_time: DateTime<Utc>,
    interval_minutes: u32,
    total_prompts: usize,
) -> RotationWindow {
    if total_prompts == 0 {
        return RotationWindow {
            index: -1,
            interval_start: now,
            interval_end: now,
        };
    }

    // A zero interval would divide by zero below; the config store never
    // persists one, but the inputs here are raw.
    let interval_ms = i64::from(interval_minutes.max(1)) * MS_PER_MINUTE;
    let elapsed_ms = now.timestamp_millis() - base_time.timestamp_millis();
    let intervals_passed = elapsed_ms.div_euclid(interval_ms);
    let index = intervals_passed.rem_euclid(total_prompts as i64);

    let interval_start = base_time + Duration::milliseconds(intervals_passed * interval_ms);

    RotationWindow {
        index,
        interval_start,
        interval_end: interval_start + Duration::milliseconds(interval_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, s).unwrap()
    }

    #[test]
    fn empty_prompt_set_returns_sentinel() {
        let now = at(12, 34, 56);
        let window = rotation_window(now, base(), 2, 0);
        assert_eq!(window.index, -1);
        assert_eq!(window.slot(), None);
        assert_eq!(window.interval_start, now);
        assert_eq!(window.interval_end, now);
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let now = at(3, 17, 41);
        let first = rotation_window(now, base(), 5, 7);
        for _ in 0..10 {
            assert_eq!(rotation_window(now, base(), 5, 7), first);
        }
    }

    #[test]
    fn window_contains_now_and_has_exact_width() {
        for &(h, m, s) in &[(0, 0, 0), (0, 1, 59), (7, 33, 12), (23, 59, 59)] {
            let now = at(h, m, s);
            let window = rotation_window(now, base(), 2, 4);
            assert!(window.interval_start <= now, "start <= now at {}", now);
            assert!(now < window.interval_end, "now < end at {}", now);
            assert_eq!(
                (window.interval_end - window.interval_start).num_milliseconds(),
                2 * MS_PER_MINUTE
            );
        }
    }

    #[test]
    fn indices_cycle_through_the_list_in_order() {
        let n = 4;
        let mut seen = Vec::new();
        for interval in 0..(3 * n) {
            // Sample the middle of each interval.
            let now = base() + Duration::minutes(2 * interval as i64) + Duration::seconds(30);
            let window = rotation_window(now, base(), 2, n);
            seen.push(window.index);
        }
        let one_cycle: Vec<i64> = (0..n as i64).collect();
        assert_eq!(seen, [one_cycle.clone(), one_cycle.clone(), one_cycle].concat());
    }

    #[test]
    fn documented_scenario_two_minute_interval_four_prompts() {
        assert_eq!(rotation_window(at(0, 0, 30), base(), 2, 4).index, 0);
        assert_eq!(rotation_window(at(0, 2, 30), base(), 2, 4).index, 1);
        // 00:08:01 => 4 intervals passed, 4 mod 4 wraps to 0.
        assert_eq!(rotation_window(at(0, 8, 1), base(), 2, 4).index, 0);
    }

    #[test]
    fn before_base_time_cycles_backward() {
        // One interval before base with 4 prompts lands on the last one.
        let now = base() - Duration::minutes(1);
        let window = rotation_window(now, base(), 2, 4);
        assert_eq!(window.index, 3);
        assert!(window.interval_start <= now && now < window.interval_end);
        assert_eq!(window.interval_end, base());

        // Two full cycles earlier still selects the same slot.
        let earlier = now - Duration::minutes(2 * 4 * 2);
        assert_eq!(rotation_window(earlier, base(), 2, 4).index, 3);
    }

    #[test]
    fn exact_interval_boundary_starts_the_next_slot() {
        // At exactly base + interval the previous window has closed.
        let now = base() + Duration::minutes(2);
        let window = rotation_window(now, base(), 2, 4);
        assert_eq!(window.index, 1);
        assert_eq!(window.interval_start, now);
    }
}
