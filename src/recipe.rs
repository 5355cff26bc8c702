//! Recipe records as stored and exchanged with the storage backends
//!
//! The wire form is camelCase JSON. Attributes the search engine does not care
//! about (attribution, timestamps, ...) are kept in `extra` so that a recipe
//! survives a load/save cycle unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Shared, immutable snapshot of the recipe collection.
///
/// Every edit produces a new `Arc`, which is what the search engine keys its
/// index cache on.
pub type RecipeCollection = Arc<Vec<Recipe>>;

/// A single ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: None,
        }
    }

    pub fn with_amount(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: Some(amount.into()),
        }
    }
}

/// A recipe as owned by the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    /// Everything else the backend sent us
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipe {
    /// Minimal recipe with only an id and a title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            tags: Vec::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            image: None,
            servings: None,
            cook_time: None,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn with_instructions<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instructions = steps.into_iter().map(Into::into).collect();
        self
    }

    /// Display name of whoever created the recipe, if the backend stamped one
    pub fn created_by(&self) -> Option<&str> {
        self.extra.get("createdByName").and_then(Value::as_str)
    }

    /// Replace every user-editable field with the contents of `draft`.
    ///
    /// Extra attributes are merged: keys in the draft win, others are kept.
    pub fn apply(&mut self, draft: NewRecipe) {
        self.title = draft.title;
        self.description = draft.description;
        self.tags = draft.tags;
        self.ingredients = draft.ingredients;
        self.instructions = draft.instructions;
        self.image = draft.image;
        self.servings = draft.servings;
        self.cook_time = draft.cook_time;
        self.extra.extend(draft.extra);
    }
}

/// A recipe without an id, as submitted for create/update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewRecipe {
    /// Attach an id, producing a full recipe
    pub fn into_recipe(self, id: impl Into<String>) -> Recipe {
        let mut recipe = Recipe::new(id, String::new());
        recipe.apply(self);
        recipe
    }
}

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal() {
        let recipe: Recipe = serde_json::from_str(r#"{"id":"1","title":"Toast"}"#).unwrap();
        assert_eq!(recipe.id, "1");
        assert_eq!(recipe.title, "Toast");
        assert!(recipe.tags.is_empty());
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.extra.is_empty());
    }

    #[test]
    fn test_null_collections() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"id":"1","title":"Toast","tags":null,"ingredients":null}"#)
                .unwrap();
        assert!(recipe.tags.is_empty());
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_extra_attributes_survive_round_trip() {
        let json = r#"{"id":"7","recipeId":"7","title":"Soup","cookTime":"20m","createdAt":1700000000,"createdByName":"sam"}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.cook_time.as_deref(), Some("20m"));
        assert_eq!(recipe.created_by(), Some("sam"));
        assert_eq!(recipe.extra.get("recipeId"), Some(&Value::from("7")));

        let back = serde_json::to_value(&recipe).unwrap();
        assert_eq!(back["createdAt"], Value::from(1700000000));
        assert_eq!(back["cookTime"], Value::from("20m"));
    }

    #[test]
    fn test_apply_keeps_id_and_merges_extra() {
        let mut recipe = Recipe::new("1", "Old");
        recipe.extra.insert("createdAt".into(), Value::from(1));
        let mut draft = NewRecipe {
            title: "New".into(),
            tags: vec!["quick".into()],
            ..Default::default()
        };
        draft.extra.insert("updatedAt".into(), Value::from(2));

        recipe.apply(draft);
        assert_eq!(recipe.id, "1");
        assert_eq!(recipe.title, "New");
        assert_eq!(recipe.tags, vec!["quick"]);
        assert_eq!(recipe.extra.len(), 2);
    }
}
