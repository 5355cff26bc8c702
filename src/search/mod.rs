//! Recipe search with fuzzy matching and field filters
//!
//! Pipeline: recipes are projected into flat records, indexed, and each query
//! token is resolved to a set of ids that are intersected.

pub mod debounce;
pub mod engine;
pub mod fuzzy;
pub mod highlight;
pub mod index;
pub mod parser;
pub mod projector;
pub mod vocabulary;


pub use debounce::{DebounceInput, Debouncer, DEFAULT_DEBOUNCE};
pub use engine::{filter_recipes, SearchEngine};
pub use fuzzy::FuzzyMatcher;
pub use highlight::{highlight, highlight_markdown, Segment};
pub use index::{FuzzyIndex, IndexHit, SearchField, MATCH_THRESHOLD};
pub use parser::{QueryParser, QueryTerm, Token};
pub use projector::{project, ProjectedRecord};
pub use vocabulary::{all_tags, complete_tag, suggest_tags, TagCompleter};
