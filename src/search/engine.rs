//! Query Evaluator
//!
//! Ties together projection, the fuzzy index and the query parser. Each
//! token resolves to a set of recipe ids; the sets are intersected, mapped
//! back onto the collection in its own order, and finally narrowed by the
//! selected tag chips.

use super::index::FuzzyIndex;
use super::parser::{QueryParser, QueryTerm, Token};
use super::projector::{project, ProjectedRecord};
use super::fuzzy::contains_ignore_case;
use crate::recipe::{Recipe, RecipeCollection};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Index built for one collection snapshot
struct CachedIndex {
    source: RecipeCollection,
    index: FuzzyIndex,
}

/// Search engine that caches its index per collection snapshot
#[derive(Default)]
pub struct SearchEngine {
    cached: Option<CachedIndex>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter `recipes` by `query` and `selected_tags`.
    ///
    /// The index is rebuilt only when `recipes` is a different `Arc` than the
    /// one seen last time.
    pub fn evaluate<'a>(
        &mut self,
        query: &str,
        selected_tags: &[String],
        recipes: &'a RecipeCollection,
    ) -> Vec<&'a Recipe> {
        if query.trim().is_empty() && selected_tags.is_empty() {
            return recipes.iter().collect();
        }

        let index = self.index_for(recipes);
        filter_with_index(index, query, selected_tags, recipes)
    }

    /// Whether an index is currently cached for exactly this snapshot
    pub fn is_cached_for(&self, recipes: &RecipeCollection) -> bool {
        self.cached
            .as_ref()
            .is_some_and(|c| Arc::ptr_eq(&c.source, recipes))
    }

    fn index_for(&mut self, recipes: &RecipeCollection) -> &mut FuzzyIndex {
        if !self.is_cached_for(recipes) {
            self.cached = None;
        }

        let cached = self.cached.get_or_insert_with(|| {
            debug!("Recipe collection changed, rebuilding index ({} recipes)", recipes.len());
            CachedIndex {
                source: Arc::clone(recipes),
                index: FuzzyIndex::new(project(recipes)),
            }
        });
        &mut cached.index
    }
}

/// One-shot filter without caching
pub fn filter_recipes<'a>(
    query: &str,
    selected_tags: &[String],
    recipes: &'a [Recipe],
) -> Vec<&'a Recipe> {
    if query.trim().is_empty() && selected_tags.is_empty() {
        return recipes.iter().collect();
    }

    let mut index = FuzzyIndex::new(project(recipes));
    filter_with_index(&mut index, query, selected_tags, recipes)
}

fn filter_with_index<'a>(
    index: &mut FuzzyIndex,
    query: &str,
    selected_tags: &[String],
    recipes: &'a [Recipe],
) -> Vec<&'a Recipe> {
    let tokens = QueryParser::tokenize(query);

    let matched: HashSet<String> = if tokens.is_empty() {
        index.records().iter().map(|r| r.id().to_string()).collect()
    } else {
        let mut sets = tokens.iter().map(|token| resolve_token(index, token));
        let first = sets.next().unwrap_or_default();
        sets.fold(first, |acc, set| acc.intersection(&set).cloned().collect())
    };

    let mut result: Vec<&Recipe> = recipes
        .iter()
        .filter(|r| matched.contains(r.id.as_str()))
        .collect();

    if !selected_tags.is_empty() {
        result.retain(|r| selected_tags.iter().all(|tag| r.tags.contains(tag)));
    }

    debug!(
        "Query '{}' with {} tag filter(s): {} of {} recipes",
        query,
        selected_tags.len(),
        result.len(),
        recipes.len()
    );
    result
}

/// Ids of every record satisfying a single token
fn resolve_token(index: &mut FuzzyIndex, token: &Token) -> HashSet<String> {
    let ids: HashSet<String> = match &token.term {
        QueryTerm::Tag(value) => scan(index.records(), |r| {
            r.recipe.tags.iter().any(|tag| contains_ignore_case(tag, value))
        }),
        QueryTerm::Ingredient(value) => {
            scan(index.records(), |r| contains_ignore_case(&r.ingredients_text, value))
        }
        QueryTerm::FreeText(text) => {
            if token.looks_negated() {
                debug!("Negation is not supported, searching '{}' literally", text);
            }
            index.search(text).into_iter().map(|hit| hit.id).collect()
        }
    };

    debug!("Token '{}' matched {} recipe(s)", token.raw, ids.len());
    ids
}

fn scan<F>(records: &[ProjectedRecord], predicate: F) -> HashSet<String>
where
    F: Fn(&ProjectedRecord) -> bool,
{
    records
        .iter()
        .filter(|r| predicate(r))
        .map(|r| r.id().to_string())
        .collect()
}
