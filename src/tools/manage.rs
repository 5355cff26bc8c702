//! `show`, `add`, `update` and `delete` commands

use super::format::format_recipe;
use super::AppContext;
use crate::error::{validate_id, AppError};
use crate::recipe::NewRecipe;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

pub async fn execute_show(ctx: &AppContext, id: &str) -> Result<String, AppError> {
    validate_id(id)?;
    let recipe = ctx
        .storage
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("recipe {}", id)))?;
    Ok(format_recipe(&recipe))
}

pub async fn execute_add(ctx: &AppContext, file: &Path) -> Result<String, AppError> {
    ctx.require_write()?;
    let fields = read_fields(file).await?;
    let draft = into_draft(fields)?;
    debug!("Read recipe '{}' from {}", draft.title, file.display());
    let recipe = ctx.storage.create(draft).await?;
    Ok(format!("Added \"{}\" with id {}", recipe.title, recipe.id))
}

pub async fn execute_update(ctx: &AppContext, id: &str, file: &Path) -> Result<String, AppError> {
    validate_id(id)?;
    ctx.require_write()?;
    let patch = read_fields(file).await?;
    debug!("Updating recipe {} with {} field(s) from {}", id, patch.len(), file.display());
    let current = ctx
        .storage
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("recipe {}", id)))?;

    let draft = into_draft(merge_fields(serde_json::to_value(current)?, patch))?;
    let recipe = ctx.storage.update(id, draft).await?;
    Ok(format!("Updated \"{}\" ({})", recipe.title, recipe.id))
}

pub async fn execute_delete(ctx: &AppContext, id: &str) -> Result<String, AppError> {
    validate_id(id)?;
    ctx.require_write()?;
    ctx.storage.delete(id).await?;
    Ok(format!("Deleted {}", id))
}

/// The top-level JSON object in `file`
async fn read_fields(file: &Path) -> Result<Map<String, Value>, AppError> {
    let data = tokio::fs::read_to_string(file).await.map_err(|e| {
        AppError::InvalidInput(format!("Cannot read {}: {}", file.display(), e))
    })?;
    match serde_json::from_str(&data)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(AppError::InvalidInput(format!(
            "{} must hold a JSON object",
            file.display()
        ))),
    }
}

/// Fields in `patch` replace those of `current`; the id never changes
fn merge_fields(current: Value, patch: Map<String, Value>) -> Map<String, Value> {
    let mut fields = match current {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    fields.extend(patch);
    fields.remove("id");
    fields
}

fn into_draft(fields: Map<String, Value>) -> Result<NewRecipe, AppError> {
    let draft: NewRecipe = serde_json::from_value(Value::Object(fields))?;
    if draft.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Recipe title cannot be empty".to_string()));
    }
    Ok(draft)
}
