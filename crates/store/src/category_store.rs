//! Category persistence over `{data_dir}/categories.json`.
//!
//! First read seeds the default category set so a fresh install has
//! something to file prompts under.

use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use promptwall_core::Category;

use crate::error::StoreError;

const CATEGORIES_FILENAME: &str = "categories.json";

/// `(name, description, color, icon)` seeded on first read.
const DEFAULT_CATEGORIES: &[(&str, &str, &str, &str)] = &[
    (
        "Drawing & Illustration",
        "Traditional and digital drawing prompts",
        "#ff6b6b",
        "palette",
    ),
    (
        "Photography",
        "Capture the world through your lens",
        "#4ecdc4",
        "camera",
    ),
    (
        "Creative Writing",
        "Stories, poems, and creative texts",
        "#45b7d1",
        "pen",
    ),
    (
        "Mixed Media",
        "Combine different artistic mediums",
        "#f9ca24",
        "layers",
    ),
];

/// File-backed category store.
pub struct CategoryStore {
    path: PathBuf,
}

impl CategoryStore {
    /// Create a store rooted at `data_dir`, ensuring the directory exists.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self {
            path: data_dir.join(CATEGORIES_FILENAME),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All categories. Seeds and persists the defaults when the file is
    /// missing.
    pub fn list(&self) -> Result<Vec<Category>, StoreError> {
        if !self.path.exists() {
            let seeded: Vec<Category> = DEFAULT_CATEGORIES
                .iter()
                .map(|&(name, description, color, icon)| Category {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    description: description.to_string(),
                    color: color.to_string(),
                    icon: icon.to_string(),
                })
                .collect();
            self.save(&seeded)?;
            info!("Seeded {} default categories", seeded.len());
            return Ok(seeded);
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Look a category up by id.
    pub fn get(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        Ok(self.list()?.into_iter().find(|c| c.id == id))
    }

    /// Add a category. Names are unique, case-insensitively.
    pub fn create(
        &self,
        name: &str,
        description: &str,
        color: &str,
        icon: &str,
    ) -> Result<Category, StoreError> {
        let mut categories = self.list()?;
        if categories
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name))
        {
            return Err(StoreError::Conflict(format!("category '{}'", name)));
        }
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
        };
        categories.push(category.clone());
        self.save(&categories)?;
        Ok(category)
    }

    fn save(&self, categories: &[Category]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(categories)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
