//! Markdown rendering of recipes

use crate::recipe::Recipe;
use crate::search::highlight_markdown;
use std::fmt::Write;

/// Format search results into markdown for display
pub fn format_search_results(recipes: &[&Recipe], total: usize, query: &str) -> String {
    let mut md = String::new();
    if recipes.len() < total {
        let _ = writeln!(md, "# Search Results · {} of {} recipes\n", recipes.len(), total);
    } else {
        let _ = writeln!(md, "# Search Results · {} recipes\n", recipes.len());
    }

    if recipes.is_empty() {
        md.push_str("No recipes match.\n");
        return md;
    }

    for recipe in recipes {
        let _ = writeln!(md, "## {}\n", highlight_markdown(&recipe.title, query));
        let _ = writeln!(md, "id: `{}`\n", recipe.id);

        if let Some(description) = recipe.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(md, "> {}\n", highlight_markdown(description, query));
        }

        if !recipe.tags.is_empty() {
            let tags: Vec<String> = recipe.tags.iter().map(|t| format!("`{t}`")).collect();
            let _ = writeln!(md, "{}\n", tags.join(" "));
        }

        md.push_str("---\n\n");
    }

    md
}

/// Cook view: everything needed at the stove, steps numbered
pub fn format_recipe(recipe: &Recipe) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# {}\n", recipe.title);

    let mut facts = Vec::new();
    if let Some(servings) = recipe.servings.as_deref().filter(|s| !s.is_empty()) {
        facts.push(format!("Serves {servings}"));
    }
    if let Some(time) = recipe.cook_time.as_deref().filter(|t| !t.is_empty()) {
        facts.push(format!("Time {time}"));
    }
    if !facts.is_empty() {
        let _ = writeln!(md, "{}\n", facts.join(" · "));
    }

    if let Some(description) = recipe.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(md, "{}\n", description);
    }

    if !recipe.ingredients.is_empty() {
        md.push_str("## Ingredients\n\n");
        for ingredient in &recipe.ingredients {
            match ingredient.amount.as_deref().filter(|a| !a.is_empty()) {
                Some(amount) => {
                    let _ = writeln!(md, "- {} {}", amount, ingredient.name);
                }
                None => {
                    let _ = writeln!(md, "- {}", ingredient.name);
                }
            }
        }
        md.push('\n');
    }

    if !recipe.instructions.is_empty() {
        md.push_str("## Steps\n\n");
        for (i, step) in recipe.instructions.iter().enumerate() {
            let _ = writeln!(md, "{}. {}", i + 1, step);
        }
        md.push('\n');
    }

    if !recipe.tags.is_empty() {
        let _ = writeln!(md, "Tags: {}", recipe.tags.join(", "));
    }
    if let Some(author) = recipe.created_by() {
        let _ = writeln!(md, "Added by {}", author);
    }

    md
}
