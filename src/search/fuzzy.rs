//! Fuzzy Matching Engine
//!
//! Approximate substring matching with an error budget. Exact ASCII substrings
//! are found through nucleo-matcher (the matcher used in Helix); everything
//! else goes through a semi-global edit distance, so a pattern matches a text
//! when some substring of the text is within `threshold * pattern_len` edits
//! of it.
//!
//! Long patterns are not split into 32-character chunks: the whole pattern has
//! to fit the budget, so a long phrase matching only in its first part fails.

use nucleo_matcher::{Config, Matcher, Utf32Str};
use unicode_normalization::UnicodeNormalization;

/// Result of matching one pattern against one text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch {
    /// Edits needed to turn the closest substring into the pattern
    pub errors: usize,
    /// `errors / pattern_len`; 0.0 is a perfect match
    pub score: f64,
}

impl FuzzyMatch {
    fn exact() -> Self {
        Self {
            errors: 0,
            score: 0.0,
        }
    }
}

/// Text prepared once for repeated matching: NFC, lowercased, split into chars
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchText {
    text: String,
    chars: Vec<char>,
}

impl MatchText {
    pub fn new(text: &str) -> Self {
        let text = normalize_for_matching(text);
        let chars = text.chars().collect();
        Self { text, chars }
    }

    fn is_ascii(&self) -> bool {
        self.text.is_ascii()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Only valid for ASCII text; nucleo expects ASCII input in the `Ascii` variant
    fn as_ascii_utf32(&self) -> Utf32Str<'_> {
        Utf32Str::Ascii(self.text.as_bytes())
    }
}

/// Fuzzy matcher with configuration
pub struct FuzzyMatcher {
    matcher: Matcher,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FuzzyMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyMatcher").finish_non_exhaustive()
    }
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        let mut config = Config::DEFAULT;
        // Diacritics are significant; only case is folded.
        config.normalize = false;
        config.ignore_case = true;

        Self {
            matcher: Matcher::new(config),
        }
    }

    /// Match `needle` against `haystack` allowing `threshold * needle.len()` edits.
    ///
    /// Returns None for an empty needle or when the budget is exceeded.
    pub fn fuzzy_match(
        &mut self,
        haystack: &MatchText,
        needle: &MatchText,
        threshold: f64,
    ) -> Option<FuzzyMatch> {
        if needle.is_empty() || haystack.is_empty() {
            return None;
        }

        if haystack.len() >= needle.len()
            && haystack.is_ascii()
            && needle.is_ascii()
            && self
                .matcher
                .substring_match(haystack.as_ascii_utf32(), needle.as_ascii_utf32())
                .is_some()
        {
            return Some(FuzzyMatch::exact());
        }

        // a zero budget still admits exact substrings the fast path skipped
        let max_errors = (threshold * needle.len() as f64).floor() as usize;
        let errors = approximate_distance(&haystack.chars, &needle.chars)?;
        if errors > max_errors {
            return None;
        }

        Some(FuzzyMatch {
            errors,
            score: errors as f64 / needle.len() as f64,
        })
    }
}

/// Smallest edit distance between `pattern` and any substring of `text`
fn approximate_distance(text: &[char], pattern: &[char]) -> Option<usize> {
    let m = pattern.len();
    if m == 0 {
        return None;
    }

    // Column i holds the cost of matching pattern[..i] ending at the current
    // text position; row 0 is free so a match may start anywhere.
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0usize; m + 1];
    let mut best = m;

    for &tc in text {
        curr[0] = 0;
        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(pattern[i - 1] != tc);
            curr[i] = substitution.min(prev[i] + 1).min(curr[i - 1] + 1);
        }
        best = best.min(curr[m]);
        if best == 0 {
            break;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    Some(best)
}

/// Case-insensitive substring test; an empty needle is contained everywhere
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    normalize_for_matching(haystack).contains(&normalize_for_matching(needle))
}

/// Normalize text for matching: Unicode NFC followed by lowercasing
fn normalize_for_matching(text: &str) -> String {
    text.nfc().flat_map(char::to_lowercase).collect()
}
