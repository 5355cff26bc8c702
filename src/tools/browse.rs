//! `browse` command
//!
//! Each input line stands for the current contents of the search box. Lines
//! go through the debouncer, and results are printed only for queries that
//! settle.

use super::AppContext;
use crate::error::AppError;
use crate::recipe::RecipeCollection;
use crate::search::{all_tags, suggest_tags, Debouncer, SearchEngine};
use std::fmt::Write as _;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub async fn execute_browse(ctx: &AppContext, tags: &[String]) -> Result<(), AppError> {
    let recipes = ctx.collection().await?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    browse(recipes, tags, ctx.config.debounce, stdin, stdout).await
}

/// Drive the debounced search loop until `input` reaches EOF
pub async fn browse<R, W>(
    recipes: RecipeCollection,
    tags: &[String],
    delay: Duration,
    input: R,
    mut out: W,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let vocabulary = all_tags(&recipes);
    let mut engine = SearchEngine::new();
    let (debounce_input, mut settled) = Debouncer::new(delay).spawn();
    let mut debounce_input = Some(debounce_input);
    let mut lines = input.lines();

    write_results(&mut out, &mut engine, "", tags, &recipes, &vocabulary).await?;

    loop {
        tokio::select! {
            line = lines.next_line(), if debounce_input.is_some() => {
                match line? {
                    Some(line) => {
                        if let Some(sender) = &debounce_input {
                            sender.push(line);
                        }
                    }
                    // dropping the sender flushes the last query
                    None => debounce_input = None,
                }
            }
            changed = settled.changed() => {
                if changed.is_err() {
                    break;
                }
                let query = settled.borrow_and_update().clone();
                write_results(&mut out, &mut engine, &query, tags, &recipes, &vocabulary).await?;
            }
        }
    }

    Ok(())
}

async fn write_results<W: AsyncWrite + Unpin>(
    out: &mut W,
    engine: &mut SearchEngine,
    query: &str,
    tags: &[String],
    recipes: &RecipeCollection,
    vocabulary: &[String],
) -> Result<(), AppError> {
    let matches = engine.evaluate(query, tags, recipes);

    let mut text = String::new();
    let _ = writeln!(text, "> {}  ({} of {})", query, matches.len(), recipes.len());
    if let Some(candidates) = suggest_tags(query, vocabulary).filter(|c| !c.is_empty()) {
        let _ = writeln!(text, "  tags: {}", candidates.join(", "));
    }
    for recipe in matches {
        let _ = writeln!(text, "- {}", recipe.title);
    }
    text.push('\n');

    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::sample_recipes;
    use std::sync::Arc;
    use tokio::io::BufReader;

    async fn run(input: &str, tags: &[String]) -> String {
        let recipes = Arc::new(sample_recipes());
        let mut out = Vec::new();
        browse(
            recipes,
            tags,
            Duration::from_millis(200),
            BufReader::new(input.as_bytes()),
            &mut out,
        )
        .await
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_lines_settle_once() {
        let out = run("c\nch\nchicken\n", &[]).await;
        assert!(out.starts_with(">   (3 of 3)\n"));
        assert!(out.contains("> chicken  (1 of 3)\n- Roast Chicken\n"));
        assert!(!out.contains("> ch  "));
        assert_eq!(out.matches("> ").count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tag_chips_and_suggestions() {
        let out = run("tag:ve\n", &["dinner".to_string()]).await;
        assert!(out.starts_with(">   (2 of 3)\n- Roast Chicken\n- Lentil Soup\n"));
        assert!(out.contains("> tag:ve  (1 of 3)\n  tags: vegan\n- Lentil Soup\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input() {
        let out = run("", &[]).await;
        assert_eq!(out.matches("> ").count(), 1);
    }
}
