//! JSON-file recipe storage
//!
//! The whole collection lives in one JSON array. Every write holds an
//! exclusive lock on a sibling `.lock` file from the read through the rename
//! of the `.tmp` file, so concurrent writers serialize instead of losing
//! each other's changes.

use super::StorageError;
use crate::recipe::{NewRecipe, Recipe};
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Held for the whole read-modify-write of a mutation
struct StoreLock {
    file: fs::File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All recipes; a missing file is an empty collection
    pub fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        if !self.path.exists() {
            debug!("No recipe file at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&data)?)
    }

    pub fn get(&self, id: &str) -> Result<Option<Recipe>, StorageError> {
        Ok(self.list()?.into_iter().find(|r| r.id == id))
    }

    /// New recipes get an epoch-millisecond id and go to the front
    pub fn create(&self, draft: NewRecipe) -> Result<Recipe, StorageError> {
        let _lock = self.lock()?;
        let mut items = self.list()?;
        let id = self.fresh_id(&items);
        let recipe = draft.into_recipe(id);
        items.insert(0, recipe.clone());
        self.save(&items)?;

        info!("Created recipe {} ({})", recipe.id, recipe.title);
        Ok(recipe)
    }

    pub fn update(&self, id: &str, draft: NewRecipe) -> Result<Recipe, StorageError> {
        let _lock = self.lock()?;
        let mut items = self.list()?;
        let recipe = items
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        recipe.apply(draft);
        let updated = recipe.clone();
        self.save(&items)?;

        info!("Updated recipe {}", id);
        Ok(updated)
    }

    /// Deleting an unknown id is not an error
    pub fn delete(&self, id: &str) -> Result<(), StorageError> {
        let _lock = self.lock()?;
        let mut items = self.list()?;
        let before = items.len();
        items.retain(|r| r.id != id);
        if items.len() != before {
            self.save(&items)?;
            info!("Deleted recipe {}", id);
        }
        Ok(())
    }

    fn fresh_id(&self, items: &[Recipe]) -> String {
        let mut millis = chrono::Utc::now().timestamp_millis();
        // two creates inside the same millisecond must not collide
        while items.iter().any(|r| r.id == millis.to_string()) {
            millis += 1;
        }
        millis.to_string()
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn ensure_parent(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Blocks until no other writer holds the store; the lock file stays in place
    fn lock(&self) -> Result<StoreLock, StorageError> {
        self.ensure_parent()?;
        let lock_path = self.lock_path();
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        file.lock_exclusive()
            .map_err(|_| StorageError::Lock(lock_path.display().to_string()))?;
        Ok(StoreLock { file })
    }

    /// Callers hold the store lock
    fn save(&self, items: &[Recipe]) -> Result<(), StorageError> {
        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(items)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!("Wrote {} recipes to {}", items.len(), self.path.display());
        Ok(())
    }
}
