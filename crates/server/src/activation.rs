//! Background prompt activation job.
//!
//! Runs one reconciliation pass immediately on start, then one per
//! configured interval: prompts whose slot falls inside the current
//! rounded-to-the-minute window are activated, active prompts scheduled
//! before the window are deactivated. Each tick re-reads the scheduling
//! config, so interval changes apply on the next tick without a restart.
//!
//! The loop is the only writer of activation flags outside the admin
//! endpoints; ticks run to completion before the next sleep, so passes
//! never overlap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use promptwall_scheduling::{activation_window, SchedulingConfig, SchedulingConfigStore};
use promptwall_store::{PromptRepository, StoreError};

/// Fallback tick pacing if the configured interval cannot be represented.
const FALLBACK_TICK: Duration = Duration::from_secs(60);

/// One reconciliation pass at `now`. Returns `(activated, deactivated)`.
///
/// A pass with `is_active == false` in the config is a no-op: the stop
/// switch quiesces state changes even while the loop keeps ticking.
pub fn run_activation_pass(
    config: &SchedulingConfig,
    prompts: &dyn PromptRepository,
    now: DateTime<Utc>,
) -> Result<(usize, usize), StoreError> {
    if !config.is_active {
        debug!("Scheduling inactive, skipping activation pass");
        return Ok((0, 0));
    }

    let (window_start, window_end) = activation_window(now, config.interval_minutes);
    debug!("Activation window: {} to {}", window_start, window_end);

    let to_activate: Vec<_> = prompts
        .scheduled_in_window(window_start, window_end)?
        .iter()
        .map(|p| p.id)
        .collect();
    let to_deactivate: Vec<_> = prompts
        .active_before(window_start)?
        .iter()
        .map(|p| p.id)
        .collect();

    let deactivated = prompts.set_active(&to_deactivate, false)?;
    let activated = prompts.set_active(&to_activate, true)?;

    if activated > 0 || deactivated > 0 {
        info!(
            "Activation pass: {} activated, {} deactivated",
            activated, deactivated
        );
    } else {
        debug!("Activation pass: no transitions");
    }
    Ok((activated, deactivated))
}

/// Handle for the periodic activation loop.
///
/// `start` is idempotent (a second call warns and returns) and `stop` is
/// safe to call when nothing is running. Cancellation is cooperative:
/// the loop observes the stop signal at tick boundaries.
pub struct ActivationJob {
    shutdown: Arc<Notify>,
    running: Arc<AtomicBool>,
}

impl ActivationJob {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Spawn the tick loop. No-op if it is already running.
    pub fn start(
        &self,
        scheduling: Arc<SchedulingConfigStore>,
        prompts: Arc<dyn PromptRepository>,
    ) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Activation job is already running");
            return;
        }

        let shutdown = Arc::clone(&self.shutdown);
        let running = Arc::clone(&self.running);
        tokio::spawn(async move {
            info!("Activation job started");
            loop {
                let config = scheduling.get();
                if let Err(e) = run_activation_pass(&config, prompts.as_ref(), Utc::now()) {
                    error!("Activation pass failed: {}", e);
                }

                let pace = config.interval().to_std().unwrap_or(FALLBACK_TICK);
                tokio::select! {
                    _ = shutdown.notified() => break,
                    _ = tokio::time::sleep(pace) => {}
                }
            }
            running.store(false, Ordering::SeqCst);
            info!("Activation job stopped");
        });
    }

    /// Signal the loop to exit at the next tick boundary.
    pub fn stop(&self) {
        if !self.is_running() {
            return;
        }
        self.shutdown.notify_one();
    }
}

impl Default for ActivationJob {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use promptwall_core::{Category, Prompt};
    use promptwall_store::JsonPromptStore;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn config(is_active: bool) -> SchedulingConfig {
        SchedulingConfig {
            interval_minutes: 2,
            base_time: base(),
            is_active,
        }
    }

    fn prompt(title: &str, scheduled_for: DateTime<Utc>, is_active: bool) -> Prompt {
        Prompt {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            category: Category {
                id: Uuid::new_v4(),
                name: "Creative Writing".to_string(),
                description: String::new(),
                color: "#45b7d1".to_string(),
                icon: "pen".to_string(),
            },
            tags: Vec::new(),
            scheduled_for,
            is_active,
            created_by: "admin".to_string(),
            submission_count: 0,
            created_at: base(),
        }
    }

    fn by_title(store: &JsonPromptStore, title: &str) -> Prompt {
        store
            .list_ordered()
            .unwrap()
            .into_iter()
            .find(|p| p.title == title)
            .unwrap()
    }

    #[test]
    fn pass_activates_in_window_and_deactivates_stale() {
        let dir = TempDir::new().unwrap();
        let store = JsonPromptStore::new(dir.path()).unwrap();
        // now = 12:00:45, window = [12:00, 12:02)
        let now = base() + ChronoDuration::seconds(45);
        store.insert(prompt("stale", base() - ChronoDuration::minutes(10), true)).unwrap();
        store.insert(prompt("due", base() + ChronoDuration::seconds(30), false)).unwrap();
        store.insert(prompt("future", base() + ChronoDuration::minutes(5), false)).unwrap();

        let (activated, deactivated) =
            run_activation_pass(&config(true), &store, now).unwrap();
        assert_eq!((activated, deactivated), (1, 1));
        assert!(by_title(&store, "due").is_active);
        assert!(!by_title(&store, "stale").is_active);
        assert!(!by_title(&store, "future").is_active);
    }

    #[test]
    fn pass_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = JsonPromptStore::new(dir.path()).unwrap();
        let now = base() + ChronoDuration::seconds(45);
        store.insert(prompt("stale", base() - ChronoDuration::minutes(10), true)).unwrap();
        store.insert(prompt("due", base() + ChronoDuration::seconds(30), false)).unwrap();

        run_activation_pass(&config(true), &store, now).unwrap();
        let (activated, deactivated) =
            run_activation_pass(&config(true), &store, now).unwrap();
        assert_eq!((activated, deactivated), (0, 0));
    }

    #[test]
    fn inactive_config_skips_all_transitions() {
        let dir = TempDir::new().unwrap();
        let store = JsonPromptStore::new(dir.path()).unwrap();
        let now = base() + ChronoDuration::seconds(45);
        store.insert(prompt("stale", base() - ChronoDuration::minutes(10), true)).unwrap();
        store.insert(prompt("due", base() + ChronoDuration::seconds(30), false)).unwrap();

        let (activated, deactivated) =
            run_activation_pass(&config(false), &store, now).unwrap();
        assert_eq!((activated, deactivated), (0, 0));
        assert!(by_title(&store, "stale").is_active);
        assert!(!by_title(&store, "due").is_active);
    }

    #[test]
    fn window_boundaries_are_half_open() {
        let dir = TempDir::new().unwrap();
        let store = JsonPromptStore::new(dir.path()).unwrap();
        let now = base() + ChronoDuration::seconds(45);
        // Window is [12:00, 12:02): the start is included, the end is not.
        store.insert(prompt("at-start", base(), false)).unwrap();
        store.insert(prompt("at-end", base() + ChronoDuration::minutes(2), false)).unwrap();

        run_activation_pass(&config(true), &store, now).unwrap();
        assert!(by_title(&store, "at-start").is_active);
        assert!(!by_title(&store, "at-end").is_active);
    }
}
