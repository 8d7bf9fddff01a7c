//! Prompt persistence.
//!
//! [`PromptRepository`] is the CRUD surface the scheduling service needs
//! from its backing store. [`JsonPromptStore`] implements it over
//! `{data_dir}/prompts.json`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use promptwall_core::Prompt;

use crate::error::StoreError;

const PROMPTS_FILENAME: &str = "prompts.json";

/// CRUD surface over the stored prompt list.
///
/// Listings are ordered by `scheduled_for` ascending unless noted.
pub trait PromptRepository: Send + Sync {
    /// All prompts.
    fn list_ordered(&self) -> Result<Vec<Prompt>, StoreError>;

    /// Only prompts with `is_active == true`.
    fn list_active_ordered(&self) -> Result<Vec<Prompt>, StoreError>;

    fn get(&self, id: Uuid) -> Result<Option<Prompt>, StoreError>;

    fn insert(&self, prompt: Prompt) -> Result<Prompt, StoreError>;

    /// Replace the stored prompt with the same id.
    fn update(&self, prompt: Prompt) -> Result<Prompt, StoreError>;

    fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Latest `scheduled_for` across all prompts.
    fn last_scheduled(&self) -> Result<Option<DateTime<Utc>>, StoreError>;

    /// Inactive prompts with `scheduled_for` in `[start, end)`.
    fn scheduled_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Prompt>, StoreError>;

    /// Active prompts with `scheduled_for` before `cutoff`.
    fn active_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<Prompt>, StoreError>;

    /// Bulk-set `is_active` on the given ids. Returns how many prompts
    /// actually changed.
    fn set_active(&self, ids: &[Uuid], active: bool) -> Result<usize, StoreError>;

    /// Rewrite every prompt's slot to `base_time + position * interval`
    /// in ascending original order, keeping each `is_active` untouched.
    /// Returns the number of prompts rescheduled.
    fn reschedule_all(
        &self,
        base_time: DateTime<Utc>,
        interval_minutes: u32,
    ) -> Result<usize, StoreError>;
}

/// Prompt store over a single pretty-printed JSON file.
///
/// Every operation is a full read-modify-write of the file; concurrent
/// writers race with last-writer-wins, matching the configuration store.
pub struct JsonPromptStore {
    path: PathBuf,
}

impl JsonPromptStore {
    /// Create a store rooted at `data_dir`, ensuring the directory exists.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self {
            path: data_dir.join(PROMPTS_FILENAME),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Prompt>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, prompts: &[Prompt]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(prompts)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn load_sorted(&self) -> Result<Vec<Prompt>, StoreError> {
        let mut prompts = self.load()?;
        prompts.sort_by_key(|p| p.scheduled_for);
        Ok(prompts)
    }
}

impl PromptRepository for JsonPromptStore {
    fn list_ordered(&self) -> Result<Vec<Prompt>, StoreError> {
        self.load_sorted()
    }

    fn list_active_ordered(&self) -> Result<Vec<Prompt>, StoreError> {
        let mut prompts = self.load_sorted()?;
        prompts.retain(|p| p.is_active);
        Ok(prompts)
    }

    fn get(&self, id: Uuid) -> Result<Option<Prompt>, StoreError> {
        Ok(self.load()?.into_iter().find(|p| p.id == id))
    }

    fn insert(&self, prompt: Prompt) -> Result<Prompt, StoreError> {
        let mut prompts = self.load()?;
        if prompts.iter().any(|p| p.id == prompt.id) {
            return Err(StoreError::Conflict(format!("prompt {}", prompt.id)));
        }
        prompts.push(prompt.clone());
        self.save(&prompts)?;
        debug!("Inserted prompt '{}' ({})", prompt.title, prompt.id);
        Ok(prompt)
    }

    fn update(&self, prompt: Prompt) -> Result<Prompt, StoreError> {
        let mut prompts = self.load()?;
        let slot = prompts
            .iter_mut()
            .find(|p| p.id == prompt.id)
            .ok_or_else(|| StoreError::NotFound(format!("prompt {}", prompt.id)))?;
        *slot = prompt.clone();
        self.save(&prompts)?;
        Ok(prompt)
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut prompts = self.load()?;
        let before = prompts.len();
        prompts.retain(|p| p.id != id);
        if prompts.len() == before {
            return Err(StoreError::NotFound(format!("prompt {}", id)));
        }
        self.save(&prompts)?;
        Ok(())
    }

    fn last_scheduled(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.load()?.iter().map(|p| p.scheduled_for).max())
    }

    fn scheduled_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Prompt>, StoreError> {
        let mut prompts = self.load_sorted()?;
        prompts.retain(|p| !p.is_active && p.scheduled_for >= start && p.scheduled_for < end);
        Ok(prompts)
    }

    fn active_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<Prompt>, StoreError> {
        let mut prompts = self.load_sorted()?;
        prompts.retain(|p| p.is_active && p.scheduled_for < cutoff);
        Ok(prompts)
    }

    fn set_active(&self, ids: &[Uuid], active: bool) -> Result<usize, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut prompts = self.load()?;
        let mut changed = 0;
        for prompt in prompts.iter_mut() {
            if ids.contains(&prompt.id) && prompt.is_active != active {
                prompt.is_active = active;
                changed += 1;
            }
        }
        if changed > 0 {
            self.save(&prompts)?;
        }
        Ok(changed)
    }

    fn reschedule_all(
        &self,
        base_time: DateTime<Utc>,
        interval_minutes: u32,
    ) -> Result<usize, StoreError> {
        let mut prompts = self.load_sorted()?;
        let interval_ms = i64::from(interval_minutes.max(1)) * 60_000;
        for (i, prompt) in prompts.iter_mut().enumerate() {
            prompt.scheduled_for = base_time + Duration::milliseconds(interval_ms * i as i64);
        }
        self.save(&prompts)?;
        debug!(
            "Rescheduled {} prompts from {} at {}m spacing",
            prompts.len(),
            base_time,
            interval_minutes
        );
        Ok(prompts.len())
    }
}
