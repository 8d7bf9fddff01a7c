//! Prompt and category domain types.
//!
//! Prompts form an ordered-by-`scheduled_for` sequence. The scheduling
//! crates treat that sequence as a cycle (rotation) or a line (drift
//! auditing); neither owns the prompt lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A creative prompt on the wall.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    /// The slot this prompt is scheduled to go live in.
    pub scheduled_for: DateTime<Utc>,
    pub is_active: bool,
    pub created_by: String,
    #[serde(default)]
    pub submission_count: u64,
    pub created_at: DateTime<Utc>,
}

impl Prompt {
    /// Whether this prompt's slot lies in the past at `now`.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        now > self.scheduled_for
    }
}

/// Display metadata for a prompt category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: String,
}
