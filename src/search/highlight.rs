//! Query highlighting for titles and descriptions
//!
//! Purely cosmetic: this marks literal, case-insensitive occurrences of the
//! whole query and can disagree with what the fuzzy index matched.

use regex::RegexBuilder;

/// A run of text, either plain or matching the query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Match(&'a str),
}

/// Split `text` into plain and matching segments
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    let query = query.trim();
    if query.is_empty() || text.is_empty() {
        return vec![Segment::Plain(text)];
    }

    let re = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        // only fails past the compiled size limit, i.e. absurdly long queries
        Err(_) => return vec![Segment::Plain(text)],
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::Plain(&text[last..m.start()]));
        }
        segments.push(Segment::Match(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::Plain(&text[last..]));
    }
    segments
}

/// Render `text` as markdown with matches in bold
pub fn highlight_markdown(text: &str, query: &str) -> String {
    highlight(text, query)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(s) => s.to_string(),
            Segment::Match(s) => format!("**{s}**"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_query() {
        assert_eq!(highlight("Roast Chicken", ""), vec![Segment::Plain("Roast Chicken")]);
        assert_eq!(highlight_markdown("Roast Chicken", "  "), "Roast Chicken");
    }

    #[test]
    fn test_case_insensitive_segments() {
        assert_eq!(
            highlight("Chicken and chicken stock", "CHICKEN"),
            vec![
                Segment::Match("Chicken"),
                Segment::Plain(" and "),
                Segment::Match("chicken"),
                Segment::Plain(" stock"),
            ]
        );
    }

    #[test]
    fn test_markdown() {
        assert_eq!(highlight_markdown("Roast Chicken", "chick"), "Roast **Chick**en");
        assert_eq!(highlight_markdown("Roast Chicken", "beef"), "Roast Chicken");
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert_eq!(highlight_markdown("1+1 (easy)", "(easy)"), "1+1 **(easy)**");
        assert_eq!(highlight_markdown("a.b", "."), "a**.**b");
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(highlight_markdown("Crème brûlée", "BRÛLÉE"), "Crème **brûlée**");
    }
}
