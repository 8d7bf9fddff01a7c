//! Linear schedule reconciliation report.
//!
//! Lays prompts out back-to-back from the base time at the configured
//! interval and compares each prompt's stored slot against that linear
//! expectation. This is intentionally a different model from the cyclic
//! rotation in [`crate::rotation`]: rotation repeats forever and backs
//! the current-prompt query; this report is sequential-once and backs
//! the admin timeline. Read-only, never mutates prompts.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use promptwall_core::Prompt;

use crate::config_store::SchedulingConfig;

/// Drift below this threshold counts as on-schedule.
pub const ON_SCHEDULE_TOLERANCE_MS: i64 = 60_000;

/// Whether a prompt's slot lies behind or ahead of `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Completed,
    Upcoming,
}

/// Health of a single prompt's schedule slot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleHealthRecord {
    pub prompt_id: Uuid,
    pub title: String,
    /// 1-based position in the ordered list.
    pub position: usize,
    pub expected_schedule_time: DateTime<Utc>,
    pub actual_schedule_time: DateTime<Utc>,
    pub is_on_schedule: bool,
    pub is_active: bool,
    pub submission_count: u64,
    pub status: SlotStatus,
}

/// Aggregate counts over the timeline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    pub total_prompts: usize,
    pub active_prompts: usize,
    pub completed_prompts: usize,
    pub upcoming_prompts: usize,
    pub on_schedule_prompts: usize,
    pub current_interval: u32,
    pub next_available_slot: DateTime<Utc>,
    pub base_time: DateTime<Utc>,
}

/// Per-prompt health records plus aggregate stats.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleReport {
    pub timeline: Vec<ScheduleHealthRecord>,
    pub stats: ScheduleStats,
}

/// The first free slot after every known prompt, or one interval from
/// `now` when the wall is empty.
pub fn next_available_slot(
    last_scheduled: Option<DateTime<Utc>>,
    config: &SchedulingConfig,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    last_scheduled.unwrap_or(now) + config.interval()
}

/// Compute the drift report for `prompts`, which must be ordered by
/// `scheduled_for` ascending.
pub fn schedule_report(
    prompts: &[Prompt],
    config: &SchedulingConfig,
    now: DateTime<Utc>,
) -> ScheduleReport {
    let interval_ms = config.interval().num_milliseconds();

    let timeline: Vec<ScheduleHealthRecord> = prompts
        .iter()
        .enumerate()
        .map(|(i, prompt)| {
            let expected = config.base_time + Duration::milliseconds(interval_ms * i as i64);
            let actual = prompt.scheduled_for;
            let drift_ms =
                (expected.timestamp_millis() - actual.timestamp_millis()).abs();
            ScheduleHealthRecord {
                prompt_id: prompt.id,
                title: prompt.title.clone(),
                position: i + 1,
                expected_schedule_time: expected,
                actual_schedule_time: actual,
                is_on_schedule: drift_ms < ON_SCHEDULE_TOLERANCE_MS,
                is_active: prompt.is_active,
                submission_count: prompt.submission_count,
                status: if prompt.is_past(now) {
                    SlotStatus::Completed
                } else {
                    SlotStatus::Upcoming
                },
            }
        })
        .collect();

    let stats = ScheduleStats {
        total_prompts: prompts.len(),
        active_prompts: prompts.iter().filter(|p| p.is_active).count(),
        completed_prompts: timeline
            .iter()
            .filter(|r| r.status == SlotStatus::Completed)
            .count(),
        upcoming_prompts: timeline
            .iter()
            .filter(|r| r.status == SlotStatus::Upcoming)
            .count(),
        on_schedule_prompts: timeline.iter().filter(|r| r.is_on_schedule).count(),
        current_interval: config.interval_minutes,
        next_available_slot: next_available_slot(
            prompts.last().map(|p| p.scheduled_for),
            config,
            now,
        ),
        base_time: config.base_time,
    };

    ScheduleReport { timeline, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use promptwall_core::Category;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn config() -> SchedulingConfig {
        SchedulingConfig {
            interval_minutes: 2,
            base_time: base(),
            is_active: true,
        }
    }

    fn prompt(title: &str, scheduled_for: DateTime<Utc>, is_active: bool) -> Prompt {
        Prompt {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            category: Category {
                id: Uuid::new_v4(),
                name: "Photography".to_string(),
                description: String::new(),
                color: "#4ecdc4".to_string(),
                icon: "camera".to_string(),
            },
            tags: Vec::new(),
            scheduled_for,
            is_active,
            created_by: "admin".to_string(),
            submission_count: 0,
            created_at: base(),
        }
    }

    #[test]
    fn on_schedule_boundary_is_strict() {
        let cfg = config();
        let now = base();
        // Position 0 expects exactly base(). 59_999 ms off is still on
        // schedule; 60_000 ms off is not.
        let just_inside = vec![prompt("a", base() + Duration::milliseconds(59_999), false)];
        let report = schedule_report(&just_inside, &cfg, now);
        assert!(report.timeline[0].is_on_schedule);

        let just_outside = vec![prompt("a", base() + Duration::milliseconds(60_000), false)];
        let report = schedule_report(&just_outside, &cfg, now);
        assert!(!report.timeline[0].is_on_schedule);

        let early = vec![prompt("a", base() - Duration::milliseconds(60_000), false)];
        let report = schedule_report(&early, &cfg, now);
        assert!(!report.timeline[0].is_on_schedule);
    }

    #[test]
    fn expected_slots_are_position_based() {
        let cfg = config();
        let prompts = vec![
            prompt("a", base(), true),
            prompt("b", base() + Duration::minutes(2), false),
            prompt("c", base() + Duration::minutes(10), false),
        ];
        let report = schedule_report(&prompts, &cfg, base());

        assert_eq!(report.timeline[0].expected_schedule_time, base());
        assert_eq!(
            report.timeline[1].expected_schedule_time,
            base() + Duration::minutes(2)
        );
        assert_eq!(
            report.timeline[2].expected_schedule_time,
            base() + Duration::minutes(4)
        );
        // "c" drifted 6 minutes from its expected slot.
        assert!(report.timeline[0].is_on_schedule);
        assert!(report.timeline[1].is_on_schedule);
        assert!(!report.timeline[2].is_on_schedule);
        assert_eq!(report.timeline[2].position, 3);
    }

    #[test]
    fn status_splits_at_now() {
        let cfg = config();
        let now = base() + Duration::minutes(3);
        let prompts = vec![
            prompt("past", base(), true),
            prompt("exact", now, false),
            prompt("future", base() + Duration::minutes(4), false),
        ];
        let report = schedule_report(&prompts, &cfg, now);
        assert_eq!(report.timeline[0].status, SlotStatus::Completed);
        // A slot at exactly `now` has not completed yet.
        assert_eq!(report.timeline[1].status, SlotStatus::Upcoming);
        assert_eq!(report.timeline[2].status, SlotStatus::Upcoming);

        assert_eq!(report.stats.completed_prompts, 1);
        assert_eq!(report.stats.upcoming_prompts, 2);
        assert_eq!(report.stats.active_prompts, 1);
        assert_eq!(report.stats.total_prompts, 3);
    }

    #[test]
    fn next_slot_follows_the_last_prompt() {
        let cfg = config();
        let now = base() + Duration::minutes(30);
        let prompts = vec![
            prompt("a", base(), false),
            prompt("b", base() + Duration::minutes(2), false),
        ];
        let report = schedule_report(&prompts, &cfg, now);
        assert_eq!(
            report.stats.next_available_slot,
            base() + Duration::minutes(4)
        );
    }

    #[test]
    fn empty_wall_schedules_from_now() {
        let cfg = config();
        let now = base() + Duration::minutes(30);
        let report = schedule_report(&[], &cfg, now);
        assert!(report.timeline.is_empty());
        assert_eq!(report.stats.total_prompts, 0);
        assert_eq!(report.stats.next_available_slot, now + Duration::minutes(2));
    }
}
