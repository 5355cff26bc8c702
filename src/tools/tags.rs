//! `tags` and `suggest` commands

use super::AppContext;
use crate::cli::SuggestArgs;
use crate::error::{validate_query, AppError};
use crate::search::{all_tags, complete_tag, suggest_tags};

pub async fn execute_tags(ctx: &AppContext) -> Result<String, AppError> {
    let recipes = ctx.collection().await?;
    let tags = all_tags(&recipes);
    if tags.is_empty() {
        return Ok("No tags yet.".to_string());
    }
    Ok(tags.join("\n"))
}

/// One line per candidate: the tag, then the query it would complete to
pub async fn execute_suggest(ctx: &AppContext, args: &SuggestArgs) -> Result<String, AppError> {
    validate_query(&args.query)?;

    let recipes = ctx.collection().await?;
    let vocabulary = all_tags(&recipes);
    match suggest_tags(&args.query, &vocabulary) {
        None => Err(AppError::InvalidInput(
            "Query does not end in tag:<partial>".to_string(),
        )),
        Some(candidates) if candidates.is_empty() => Ok("No matching tags.".to_string()),
        Some(candidates) => Ok(candidates
            .into_iter()
            .map(|tag| format!("{}\t{}", tag, complete_tag(&args.query, tag)))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
