//! `whoami` command

use super::AppContext;
use crate::error::AppError;

pub fn execute_whoami(ctx: &AppContext) -> Result<String, AppError> {
    let tokens = ctx
        .tokens
        .as_ref()
        .ok_or_else(|| AppError::Unauthorized("Not signed in".to_string()))?;
    let profile = tokens.profile().ok_or_else(|| {
        AppError::Unauthorized("Stored session has no readable identity token".to_string())
    })?;

    let mut out = format!("Signed in as {}", profile.display_name);
    if let Some(email) = &profile.email {
        out.push_str(&format!("\n  Email: {}", email));
    }
    out.push_str(&format!("\n  Subject: {}", profile.sub));
    if !tokens.is_authenticated(chrono::Utc::now().timestamp()) {
        out.push_str("\n  Session expired; sign in again to make changes");
    }
    Ok(out)
}
