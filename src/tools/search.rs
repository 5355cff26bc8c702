//! `search` command

use super::format::format_search_results;
use super::AppContext;
use crate::cli::SearchArgs;
use crate::error::{validate_query, AppError};
use crate::search::SearchEngine;
use tracing::debug;

pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 200;

pub async fn execute_search(ctx: &AppContext, args: &SearchArgs) -> Result<String, AppError> {
    validate_query(&args.query)?;
    let limit = match args.limit {
        Some(0) => {
            return Err(AppError::InvalidInput(
                "Limit must be at least 1".to_string(),
            ))
        }
        Some(n) => n.min(MAX_LIMIT),
        None => DEFAULT_LIMIT,
    };

    debug!("Search request: query '{}', tags {:?}", args.query, args.tags);

    let recipes = ctx.collection().await?;
    let mut engine = SearchEngine::new();
    let matches = engine.evaluate(&args.query, &args.tags, &recipes);
    let total = matches.len();

    let shown: Vec<_> = matches.into_iter().take(limit).collect();
    Ok(format_search_results(&shown, total, args.query.trim()))
}
