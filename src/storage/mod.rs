//! Recipe storage
//!
//! Two backends exist: a JSON file on disk and a remote HTTP API. Which one
//! is used is decided once, from [`StorageConfig`], when the app starts.

pub mod local;
pub mod remote;

pub use local::LocalStorage;
pub use remote::RemoteStorage;

use crate::auth::TokenSet;
use crate::config::StorageConfig;
use crate::recipe::{NewRecipe, Recipe};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid recipe data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not lock {0}")]
    Lock(String),

    #[error("Request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Recipe {0} not found")]
    NotFound(String),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// The configured storage backend
#[derive(Debug)]
pub enum Storage {
    Local(LocalStorage),
    Remote(RemoteStorage),
}

impl Storage {
    /// Open the backend described by `config`
    pub fn open(config: &StorageConfig, tokens: Option<TokenSet>) -> Result<Self, StorageError> {
        match config {
            StorageConfig::Local { path } => Ok(Storage::Local(LocalStorage::new(path.clone()))),
            StorageConfig::Remote { base_url } => {
                Ok(Storage::Remote(RemoteStorage::new(base_url, tokens)?))
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Storage::Local(_) => "local file",
            Storage::Remote(_) => "remote API",
        }
    }

    /// Whether writes are expected to succeed with the current credentials
    pub fn can_write(&self) -> bool {
        match self {
            Storage::Local(_) => true,
            Storage::Remote(remote) => remote.is_authenticated(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        match self {
            Storage::Local(s) => s.list(),
            Storage::Remote(s) => s.list().await,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Recipe>, StorageError> {
        match self {
            Storage::Local(s) => s.get(id),
            Storage::Remote(s) => s.get(id).await,
        }
    }

    pub async fn create(&self, draft: NewRecipe) -> Result<Recipe, StorageError> {
        match self {
            Storage::Local(s) => s.create(draft),
            Storage::Remote(s) => s.create(draft).await,
        }
    }

    pub async fn update(&self, id: &str, draft: NewRecipe) -> Result<Recipe, StorageError> {
        match self {
            Storage::Local(s) => s.update(id, draft),
            Storage::Remote(s) => s.update(id, draft).await,
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        match self {
            Storage::Local(s) => s.delete(id),
            Storage::Remote(s) => s.delete(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_local() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::Local {
            path: dir.path().join("recipes.json"),
        };
        let storage = Storage::open(&config, None).unwrap();
        assert_eq!(storage.backend_name(), "local file");
        assert!(storage.can_write());
        assert!(storage.list().await.unwrap().is_empty());
    }

    #[test]
    fn test_open_remote_without_session_is_read_only() {
        let config = StorageConfig::Remote {
            base_url: "https://api.example.com".to_string(),
        };
        let storage = Storage::open(&config, None).unwrap();
        assert_eq!(storage.backend_name(), "remote API");
        assert!(!storage.can_write());
    }

    #[test]
    fn test_open_remote_rejects_bad_url() {
        let config = StorageConfig::Remote {
            base_url: "not a url".to_string(),
        };
        assert!(matches!(
            Storage::open(&config, None),
            Err(StorageError::InvalidBaseUrl(_))
        ));
    }
}
