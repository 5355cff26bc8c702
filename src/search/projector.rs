//! Record Projector
//!
//! Flattens recipes into records whose ingredient and instruction lists are
//! plain text, so the index and the `ing:` filter can scan them directly.

use crate::recipe::Recipe;

/// Search-friendly view of one recipe
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRecord {
    pub recipe: Recipe,
    /// One `"{amount} {name}"` line per ingredient
    pub ingredients_text: String,
    /// One line per instruction step
    pub instructions_text: String,
}

impl ProjectedRecord {
    pub fn id(&self) -> &str {
        &self.recipe.id
    }

    pub fn from_recipe(recipe: &Recipe) -> Self {
        // A missing amount still contributes the separating space.
        let ingredients_text = recipe
            .ingredients
            .iter()
            .map(|i| format!("{} {}", i.amount.as_deref().unwrap_or(""), i.name))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            recipe: recipe.clone(),
            ingredients_text,
            instructions_text: recipe.instructions.join("\n"),
        }
    }
}

/// Project every recipe, preserving order and length
pub fn project(recipes: &[Recipe]) -> Vec<ProjectedRecord> {
    recipes.iter().map(ProjectedRecord::from_recipe).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Ingredient;

    #[test]
    fn test_ingredients_text() {
        let recipe = Recipe::new("1", "Pancakes").with_ingredients(vec![
            Ingredient::with_amount("flour", "2 cups"),
            Ingredient::new("salt"),
        ]);
        let record = ProjectedRecord::from_recipe(&recipe);
        assert_eq!(record.ingredients_text, "2 cups flour\n salt");
    }

    #[test]
    fn test_instructions_text() {
        let recipe = Recipe::new("1", "Pancakes").with_instructions(["Mix", "Fry"]);
        let record = ProjectedRecord::from_recipe(&recipe);
        assert_eq!(record.instructions_text, "Mix\nFry");
    }

    #[test]
    fn test_empty_lists() {
        let record = ProjectedRecord::from_recipe(&Recipe::new("1", "Water"));
        assert_eq!(record.ingredients_text, "");
        assert_eq!(record.instructions_text, "");
    }

    #[test]
    fn test_project_preserves_order() {
        let recipes = vec![Recipe::new("b", "B"), Recipe::new("a", "A")];
        let records = project(&recipes);
        let ids: Vec<_> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(project(&[]).is_empty());
    }
}
