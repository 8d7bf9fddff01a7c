//! Prompt rotation scheduling.
//!
//! Two deliberately separate time models operate over the same
//! ordered-by-`scheduled_for` prompt list:
//!
//! - [`rotation`] treats the list as an infinite cycle and selects the
//!   prompt live at an instant. Backs the current-prompt query.
//! - [`reconcile`] treats the list as a one-shot linear layout from the
//!   base time and audits each prompt's stored slot against it. Backs
//!   the admin timeline; [`window`] holds the rounded time-window math
//!   used by the activation job.
//!
//! [`config_store`] persists the `{intervalMinutes, baseTime, isActive}`
//! singleton both models read.

pub mod config_store;
pub mod reconcile;
pub mod rotation;
pub mod window;

pub use config_store::{
    ConfigStoreError, SchedulingConfig, SchedulingConfigPatch, SchedulingConfigStore,
    DEFAULT_INTERVAL_MINUTES,
};
pub use reconcile::{
    next_available_slot, schedule_report, ScheduleHealthRecord, ScheduleReport, ScheduleStats,
    SlotStatus,
};
pub use rotation::{rotation_window, RotationWindow};
pub use window::activation_window;
