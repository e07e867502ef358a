//! Natural-language filter parser.
//!
//! A phrase is lowercased and trimmed, then checked against [`PHRASE_RULES`]
//! in order. The first rule whose trigger matches produces the filter; later
//! rules are never consulted, even if the extractor fails. New phrasings are
//! supported by inserting a rule at the priority they need.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{Filter, FilterError};

const UNPARSABLE_QUERY: &str = "unable to parse natural language query";
const UNPARSABLE_NUMBER: &str = "unable to parse number in query";
const UNPARSABLE_LETTER: &str = "invalid format for contains_character";

/// One entry in the ordered rule table.
pub struct PhraseRule {
    pub name: &'static str,
    applies: fn(&str) -> bool,
    extract: fn(&str) -> Result<Filter, FilterError>,
}

/// Recognized phrasings, highest priority first.
pub const PHRASE_RULES: &[PhraseRule] = &[
    PhraseRule {
        name: "single_word_palindrome",
        applies: |q| q.contains("palindromic") && q.contains("single word"),
        extract: |_| {
            Ok(Filter {
                is_palindrome: Some(true),
                word_count: Some(1),
                ..Default::default()
            })
        },
    },
    PhraseRule {
        name: "longer_than",
        applies: |q| q.contains("longer than"),
        extract: extract_longer_than,
    },
    PhraseRule {
        name: "containing_letter",
        applies: |q| q.contains("containing the letter"),
        extract: extract_letter,
    },
    PhraseRule {
        name: "palindrome",
        applies: |q| q.contains("palindromic"),
        extract: |_| {
            Ok(Filter {
                is_palindrome: Some(true),
                ..Default::default()
            })
        },
    },
];

/// Translate a free-text phrase into a validated [`Filter`].
pub fn parse_phrase(phrase: &str) -> Result<Filter, FilterError> {
    let normalized = phrase.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(FilterError::EmptyQuery);
    }

    let rule = PHRASE_RULES
        .iter()
        .find(|rule| (rule.applies)(&normalized))
        .ok_or_else(|| FilterError::Unparsable(UNPARSABLE_QUERY.to_string()))?;

    tracing::debug!(rule = rule.name, phrase = %normalized, "Matched phrase rule");

    let filter = (rule.extract)(&normalized)?;
    filter.validate()?;
    Ok(filter)
}

fn longer_than_template() -> &'static Regex {
    static TEMPLATE: OnceLock<Regex> = OnceLock::new();
    TEMPLATE.get_or_init(|| {
        Regex::new(r"^strings\s+longer\s+than\s+([+-]?\d+)\s+characters")
            .expect("longer-than template is a valid regex")
    })
}

// "strings longer than {n} characters" means length >= n + 1.
fn extract_longer_than(query: &str) -> Result<Filter, FilterError> {
    let n: i64 = longer_than_template()
        .captures(query)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| FilterError::Unparsable(UNPARSABLE_NUMBER.to_string()))?;

    let min_length = n
        .checked_add(1)
        .ok_or_else(|| FilterError::Unparsable(UNPARSABLE_NUMBER.to_string()))?;

    Ok(Filter {
        min_length: Some(min_length),
        ..Default::default()
    })
}

fn extract_letter(query: &str) -> Result<Filter, FilterError> {
    let (_, rest) = query
        .split_once("letter ")
        .ok_or_else(|| FilterError::Unparsable(UNPARSABLE_LETTER.to_string()))?;

    Ok(Filter {
        contains_character: Some(rest.trim().to_string()),
        ..Default::default()
    })
}
