//! Command implementations
//!
//! Every command returns the markdown (or plain text) it wants printed, or an
//! [`AppError`] that `main` maps to an exit code.

pub mod browse;
pub mod format;
pub mod manage;
pub mod search;
pub mod tags;
pub mod whoami;

use crate::auth::{load_tokens, TokenSet};
use crate::config::Config;
use crate::error::AppError;
use crate::recipe::RecipeCollection;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::debug;

/// Everything a command needs: settings, session and the storage backend
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub tokens: Option<TokenSet>,
    pub storage: Storage,
}

impl AppContext {
    pub fn open(config: Config) -> Result<Self, AppError> {
        let tokens = load_tokens(&config.token_file)
            .map_err(|e| AppError::Config(format!("{:#}", e)))?;
        let storage = Storage::open(&config.storage, tokens.clone())?;
        debug!("Using {} storage", storage.backend_name());

        Ok(Self {
            config,
            tokens,
            storage,
        })
    }

    /// Current snapshot of the whole collection
    pub async fn collection(&self) -> Result<RecipeCollection, AppError> {
        Ok(Arc::new(self.storage.list().await?))
    }

    /// Writes need a live session when talking to the remote API
    pub fn require_write(&self) -> Result<(), AppError> {
        if self.storage.can_write() {
            Ok(())
        } else {
            Err(AppError::Unauthorized(
                "Sign in to change recipes on the remote API".to_string(),
            ))
        }
    }
}
