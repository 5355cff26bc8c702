//! Fuzzy Index
//!
//! Holds the projected records together with pre-normalized copies of the
//! searchable fields. The field set and threshold are fixed.

use super::fuzzy::{FuzzyMatcher, MatchText};
use super::projector::ProjectedRecord;
use tracing::debug;

/// Match laxness: 0.0 demands exact substrings, 1.0 matches anything
pub const MATCH_THRESHOLD: f64 = 0.2;

/// Fields the index searches, all with equal weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Description,
    Tags,
    IngredientsText,
    InstructionsText,
}

impl SearchField {
    pub const ALL: [SearchField; 5] = [
        SearchField::Title,
        SearchField::Description,
        SearchField::Tags,
        SearchField::IngredientsText,
        SearchField::InstructionsText,
    ];
}

/// One record matched by a search
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit {
    /// Position of the record in the indexed sequence
    pub position: usize,
    pub id: String,
    /// Best score over all fields; lower is better
    pub score: f64,
    pub field: SearchField,
}

#[derive(Debug)]
struct IndexEntry {
    /// `(field, text)` pairs; tags contribute one pair each
    values: Vec<(SearchField, MatchText)>,
}

impl IndexEntry {
    fn from_record(record: &ProjectedRecord) -> Self {
        let recipe = &record.recipe;
        let mut values = Vec::with_capacity(4 + recipe.tags.len());

        values.push((SearchField::Title, MatchText::new(&recipe.title)));
        if let Some(description) = &recipe.description {
            values.push((SearchField::Description, MatchText::new(description)));
        }
        for tag in &recipe.tags {
            values.push((SearchField::Tags, MatchText::new(tag)));
        }
        values.push((
            SearchField::IngredientsText,
            MatchText::new(&record.ingredients_text),
        ));
        values.push((
            SearchField::InstructionsText,
            MatchText::new(&record.instructions_text),
        ));

        values.retain(|(_, text)| !text.is_empty());
        Self { values }
    }
}

/// Fuzzy search index over a fixed set of projected records
#[derive(Debug)]
pub struct FuzzyIndex {
    records: Vec<ProjectedRecord>,
    entries: Vec<IndexEntry>,
    matcher: FuzzyMatcher,
    threshold: f64,
}

impl FuzzyIndex {
    pub fn new(records: Vec<ProjectedRecord>) -> Self {
        Self::with_threshold(records, MATCH_THRESHOLD)
    }

    pub(crate) fn with_threshold(records: Vec<ProjectedRecord>, threshold: f64) -> Self {
        let entries = records.iter().map(IndexEntry::from_record).collect();
        debug!("Built fuzzy index over {} records", records.len());

        Self {
            records,
            entries,
            matcher: FuzzyMatcher::new(),
            threshold,
        }
    }

    pub fn records(&self) -> &[ProjectedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Search every record for `pattern`.
    ///
    /// Hits are ordered best score first; equal scores keep index order.
    pub fn search(&mut self, pattern: &str) -> Vec<IndexHit> {
        let needle = MatchText::new(pattern);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for (position, entry) in self.entries.iter().enumerate() {
            let mut best: Option<(f64, SearchField)> = None;

            for (field, text) in &entry.values {
                if let Some(m) = self.matcher.fuzzy_match(text, &needle, self.threshold) {
                    if best.map_or(true, |(score, _)| m.score < score) {
                        best = Some((m.score, *field));
                    }
                    if m.score == 0.0 {
                        break;
                    }
                }
            }

            if let Some((score, field)) = best {
                hits.push(IndexHit {
                    position,
                    id: self.records[position].id().to_string(),
                    score,
                    field,
                });
            }
        }

        // sort_by is stable, so ties stay in collection order
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits
    }
}
