//! Session tokens and identity claims
//!
//! Tokens are obtained elsewhere (the hosted login flow) and stored as JSON.
//! This module only decides whether they are still usable and reads the
//! profile claims out of the identity token.

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Tokens within this many seconds of expiry are treated as expired
pub const EXPIRY_LEEWAY_SECS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Unix seconds
    pub expires_at: i64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenPreference {
    #[default]
    Id,
    Access,
}

impl TokenSet {
    pub fn is_authenticated(&self, now: i64) -> bool {
        self.expires_at > now + EXPIRY_LEEWAY_SECS
    }

    /// Token to send as `Authorization: Bearer`, if the session is live
    pub fn bearer(&self, prefer: TokenPreference, now: i64) -> Option<&str> {
        if !self.is_authenticated(now) {
            return None;
        }
        let id = self.id_token.as_deref().filter(|t| !t.is_empty());
        let access = Some(self.access_token.as_str()).filter(|t| !t.is_empty());
        match prefer {
            TokenPreference::Id => id.or(access),
            TokenPreference::Access => access.or(id),
        }
    }

    pub fn profile(&self) -> Option<Profile> {
        self.id_token.as_deref().and_then(extract_profile)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub sub: String,
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub display_name: String,
}

#[derive(Deserialize)]
struct Claims {
    sub: Option<String>,
    #[serde(rename = "cognito:username")]
    username: Option<String>,
    email: Option<String>,
    nickname: Option<String>,
}

/// Decode the payload of a JWT without verifying it
///
/// Returns `None` for anything that is not three dot-separated segments with
/// a base64url JSON payload carrying a subject.
pub fn extract_profile(id_token: &str) -> Option<Profile> {
    let mut parts = id_token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;

    let sub = claims
        .sub
        .or(claims.username)
        .filter(|s| !s.is_empty())?;
    let email = claims.email.filter(|s| !s.is_empty());
    let nickname = claims.nickname.filter(|s| !s.is_empty());

    let display_name = nickname
        .clone()
        .or_else(|| {
            email
                .as_deref()
                .and_then(|e| e.split('@').next())
                .filter(|local| !local.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| sub.clone());

    Some(Profile {
        sub,
        email,
        nickname,
        display_name,
    })
}

/// Default location of the stored token set
pub fn default_token_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join("recipebox").join("tokens.json"))
}

/// Load the token set; a missing file means no session
pub fn load_tokens(path: &Path) -> Result<Option<TokenSet>> {
    if !path.exists() {
        debug!("No token file at {}", path.display());
        return Ok(None);
    }

    let data = fs::read_to_string(path).context("Failed to read token file")?;
    let tokens: TokenSet = serde_json::from_str(&data).context("Failed to parse token file")?;

    if !tokens.is_authenticated(chrono::Utc::now().timestamp()) {
        warn!("Stored session has expired; writes to the remote API will be refused");
    }
    Ok(Some(tokens))
}
