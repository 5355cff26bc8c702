//! Query Parser
//!
//! Splits a raw query into tokens and classifies each one as a tag filter,
//! an ingredient filter, or a free-text term.
//!
//! Grammar, tried leftmost-first at every position:
//!
//! ```text
//! -?field:"quoted value"
//! -?field:value
//! "quoted phrase"
//! word
//! ```

use regex::Regex;
use std::sync::OnceLock;

/// How a token is resolved against the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTerm {
    /// `tag:` / `t:`: some tag contains the value (case-insensitive)
    Tag(String),
    /// `ing:` / `ingredient:`: the ingredient lines contain the value
    Ingredient(String),
    /// Everything else, matched through the fuzzy index
    FreeText(String),
}

/// A single token of a query, quotes already stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub raw: String,
    pub term: QueryTerm,
}

impl Token {
    fn classify(raw: String) -> Self {
        let term = match field_pattern().captures(&raw) {
            Some(caps) => {
                let value = caps[2].to_string();
                match caps[1].to_lowercase().as_str() {
                    "tag" | "t" => QueryTerm::Tag(value),
                    "ing" | "ingredient" => QueryTerm::Ingredient(value),
                    // Unknown fields search the whole token, prefix included.
                    _ => QueryTerm::FreeText(raw.clone()),
                }
            }
            None => QueryTerm::FreeText(raw.clone()),
        };

        Self { raw, term }
    }

    /// `-field:value` is tokenized as one unit but negation is not applied
    pub fn looks_negated(&self) -> bool {
        self.raw.starts_with('-') && self.raw.contains(':')
    }
}

/// Query tokenizer
pub struct QueryParser;

impl QueryParser {
    /// Tokenize `query` left to right. Never fails; malformed quoting is
    /// handled by falling through to the bare-word rule.
    pub fn tokenize(query: &str) -> Vec<Token> {
        token_pattern()
            .captures_iter(query)
            .map(|caps| {
                let raw = if let (Some(field), Some(value)) = (caps.name("field"), caps.name("quoted")) {
                    format!("{}:{}", field.as_str(), value.as_str())
                } else {
                    strip_quotes(&caps[0]).to_string()
                };
                Token::classify(raw)
            })
            .collect()
    }
}

fn strip_quotes(token: &str) -> &str {
    let token = token.strip_prefix('"').unwrap_or(token);
    token.strip_suffix('"').unwrap_or(token)
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?P<field>-?[A-Za-z0-9_]+):"(?P<quoted>[^"]+)"|-?[A-Za-z0-9_]+:\S+|"[^"]+"|\S+"#)
            .expect("token pattern is valid")
    })
}

fn field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)^([A-Za-z0-9_]+):(.*)$").expect("field pattern is valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raws(q: &str) -> Vec<String> {
        QueryParser::tokenize(q).into_iter().map(|t| t.raw).collect()
    }

    fn terms(q: &str) -> Vec<QueryTerm> {
        QueryParser::tokenize(q).into_iter().map(|t| t.term).collect()
    }

    #[test]
    fn test_basic_words() {
        assert_eq!(raws("spicy  bean chili"), vec!["spicy", "bean", "chili"]);
        assert_eq!(
            terms("chili"),
            vec![QueryTerm::FreeText("chili".to_string())]
        );
    }

    #[test]
    fn test_empty_query() {
        assert!(QueryParser::tokenize("").is_empty());
        assert!(QueryParser::tokenize("   \t ").is_empty());
    }

    #[test]
    fn test_field_filters() {
        assert_eq!(
            terms("tag:dessert t:quick ing:flour ingredient:egg"),
            vec![
                QueryTerm::Tag("dessert".into()),
                QueryTerm::Tag("quick".into()),
                QueryTerm::Ingredient("flour".into()),
                QueryTerm::Ingredient("egg".into()),
            ]
        );
    }

    #[test]
    fn test_field_names_case_insensitive() {
        assert_eq!(terms("TAG:Vegan"), vec![QueryTerm::Tag("Vegan".into())]);
        assert_eq!(terms("Ing:Salt"), vec![QueryTerm::Ingredient("Salt".into())]);
    }

    #[test]
    fn test_quoted_phrase() {
        assert_eq!(raws(r#"soup "slow cooker" easy"#), vec!["soup", "slow cooker", "easy"]);
        assert_eq!(
            terms(r#""slow cooker""#),
            vec![QueryTerm::FreeText("slow cooker".into())]
        );
    }

    #[test]
    fn test_quoted_field_value() {
        assert_eq!(
            terms(r#"tag:"main course" ing:"olive oil""#),
            vec![
                QueryTerm::Tag("main course".into()),
                QueryTerm::Ingredient("olive oil".into()),
            ]
        );
    }

    #[test]
    fn test_unknown_field_keeps_whole_token() {
        assert_eq!(terms("foo:bar"), vec![QueryTerm::FreeText("foo:bar".into())]);
    }

    #[test]
    fn test_empty_field_value() {
        // "tag:" only matches the bare-word rule, then classifies with an empty value
        assert_eq!(terms("tag:"), vec![QueryTerm::Tag(String::new())]);
    }

    #[test]
    fn test_negation_is_literal() {
        let tokens = QueryParser::tokenize("-tag:meat");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].raw, "-tag:meat");
        assert_eq!(tokens[0].term, QueryTerm::FreeText("-tag:meat".into()));
        assert!(tokens[0].looks_negated());
        assert!(!QueryParser::tokenize("tag:meat")[0].looks_negated());
    }

    #[test]
    fn test_unclosed_quote() {
        assert_eq!(raws(r#"hello "unclosed world"#), vec!["hello", "unclosed", "world"]);
    }

    #[test]
    fn test_empty_quotes() {
        assert_eq!(raws(r#""""#), vec![""]);
    }

    #[test]
    fn test_field_value_with_colon() {
        assert_eq!(terms("tag:a:b"), vec![QueryTerm::Tag("a:b".into())]);
    }

    #[test]
    fn test_order_preserved() {
        assert_eq!(
            raws(r#"b tag:x "c d" a"#),
            vec!["b", "tag:x", "c d", "a"]
        );
    }
}
