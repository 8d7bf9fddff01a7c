//! Durable scheduling configuration.
//!
//! A single JSON record at `{data_dir}/scheduling.json`:
//!
//! ```json
//! { "intervalMinutes": 2, "baseTime": "2024-01-01T00:00:00Z", "isActive": true }
//! ```
//!
//! Reads never fail: a missing record is created with defaults, and an
//! unreadable or corrupt record falls back to the in-memory default so
//! request handling degrades to "scheduling inactive" instead of
//! erroring. Write failures propagate to the caller.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Default rotation interval in minutes.
pub const DEFAULT_INTERVAL_MINUTES: u32 = 2;

const CONFIG_FILENAME: &str = "scheduling.json";

/// The process-wide scheduling configuration singleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingConfig {
    pub interval_minutes: u32,
    pub base_time: DateTime<Utc>,
    pub is_active: bool,
}

impl SchedulingConfig {
    /// The hardcoded default: short interval, counting from `now`, inactive.
    pub fn default_at(now: DateTime<Utc>) -> Self {
        Self {
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            base_time: now,
            is_active: false,
        }
    }

    /// The rotation interval as a duration. Clamped to one minute: the
    /// store never persists a zero interval, but the file is editable.
    pub fn interval(&self) -> Duration {
        Duration::minutes(i64::from(self.interval_minutes.max(1)))
    }
}

/// Partial update merged onto the stored record field-by-field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingConfigPatch {
    pub interval_minutes: Option<u32>,
    pub base_time: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

#[derive(Error, Debug)]
pub enum ConfigStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed store for the scheduling configuration singleton.
///
/// Read-modify-write with no lock; concurrent admin updates race with
/// last-writer-wins on the full merged record.
pub struct SchedulingConfigStore {
    path: PathBuf,
}

impl SchedulingConfigStore {
    /// Create a store rooted at `data_dir`, ensuring the directory exists.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, ConfigStoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self {
            path: data_dir.join(CONFIG_FILENAME),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current configuration.
    ///
    /// Missing record: persists and returns the default. Unreadable
    /// record: returns the default without persisting, so a transient
    /// read failure does not clobber the stored record.
    pub fn get(&self) -> SchedulingConfig {
        match self.read() {
            Ok(Some(config)) => config,
            Ok(None) => {
                let config = SchedulingConfig::default_at(Utc::now());
                if let Err(e) = self.write(&config) {
                    warn!("Failed to persist default scheduling config: {}", e);
                }
                config
            }
            Err(e) => {
                warn!("Failed to read scheduling config ({}), using defaults", e);
                SchedulingConfig::default_at(Utc::now())
            }
        }
    }

    /// Merge `patch` onto the current record and persist the result.
    /// Omitted fields keep their prior values.
    pub fn update(
        &self,
        patch: SchedulingConfigPatch,
    ) -> Result<SchedulingConfig, ConfigStoreError> {
        let mut config = self.get();
        if let Some(minutes) = patch.interval_minutes {
            config.interval_minutes = minutes.max(1);
        }
        if let Some(base_time) = patch.base_time {
            config.base_time = base_time;
        }
        if let Some(is_active) = patch.is_active {
            config.is_active = is_active;
        }
        self.write(&config)?;
        Ok(config)
    }

    /// Restore and persist the default configuration.
    pub fn reset(&self) -> Result<SchedulingConfig, ConfigStoreError> {
        let config = SchedulingConfig::default_at(Utc::now());
        self.write(&config)?;
        Ok(config)
    }

    fn read(&self) -> Result<Option<SchedulingConfig>, ConfigStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn write(&self, config: &SchedulingConfig) -> Result<(), ConfigStoreError> {
        let json = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
