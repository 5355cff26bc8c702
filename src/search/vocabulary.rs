//! Tag vocabulary and `tag:` completion

use crate::recipe::Recipe;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Every distinct tag in the collection, in first-seen order
pub fn all_tags(recipes: &[Recipe]) -> Vec<String> {
    let mut seen = HashSet::new();
    recipes
        .iter()
        .flat_map(|r| r.tags.iter())
        .filter(|tag| seen.insert(*tag))
        .cloned()
        .collect()
}

fn trailing_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"tag:(\S*)$").expect("tag pattern is valid"))
}

/// The partial tag being typed at the end of `query`, if any
pub fn partial_tag(query: &str) -> Option<&str> {
    trailing_tag_pattern()
        .captures(query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Vocabulary entries containing the partial tag at the end of `query`
pub fn suggest_tags<'a>(query: &str, vocabulary: &'a [String]) -> Option<Vec<&'a str>> {
    let partial = partial_tag(query)?.to_lowercase();
    Some(
        vocabulary
            .iter()
            .filter(|tag| tag.to_lowercase().contains(&partial))
            .map(String::as_str)
            .collect(),
    )
}

/// Replace the trailing `tag:<partial>` with the chosen tag and a space
pub fn complete_tag(query: &str, tag: &str) -> String {
    trailing_tag_pattern()
        .replace(query, regex::NoExpand(&format!("tag:{tag} ")))
        .into_owned()
}

/// Suggestion list state for a search box: which candidates are offered
/// and which one is highlighted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagCompleter {
    suggestions: Vec<String>,
    selected: usize,
    visible: bool,
}

impl TagCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute suggestions after the query text changed
    pub fn update(&mut self, query: &str, vocabulary: &[String]) {
        match suggest_tags(query, vocabulary) {
            Some(found) => {
                self.suggestions = found.into_iter().map(str::to_string).collect();
                self.selected = 0;
                self.visible = true;
            }
            None => self.dismiss(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn selected(&self) -> Option<&str> {
        self.suggestions.get(self.selected).map(String::as_str)
    }

    pub fn select_next(&mut self) {
        if self.visible {
            self.selected = (self.selected + 1).min(self.suggestions.len().saturating_sub(1));
        }
    }

    pub fn select_previous(&mut self) {
        if self.visible {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    /// Apply the highlighted suggestion to `query` and hide the list.
    ///
    /// Returns None when nothing is offered or the query no longer ends in `tag:`.
    pub fn accept(&mut self, query: &str) -> Option<String> {
        if !self.visible || partial_tag(query).is_none() {
            return None;
        }
        let completed = self.selected().map(|tag| complete_tag(query, tag));
        self.dismiss();
        completed
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
        self.suggestions.clear();
        self.selected = 0;
    }
}
