//! Filter model: an optional, independent set of predicates over stored
//! entries, combined as a conjunction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Entry;

/// Reasons a filter cannot be built or evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("at least one filter query parameter must be supplied")]
    NoFilterSupplied,

    #[error("conflicting filters: min_length ({min_length}) > max_length ({max_length})")]
    ConflictingFilters { min_length: i64, max_length: i64 },

    #[error("invalid {field} value")]
    InvalidValue { field: &'static str },

    #[error("query parameter is required")]
    EmptyQuery,

    #[error("{0}")]
    Unparsable(String),
}

/// Canonical filter. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Filter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<i64>,
    /// Case-insensitive substring tested against the stored value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<String>,
}

/// Raw explicit query parameters, exactly as received.
///
/// An empty string counts as "not supplied".
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterParams {
    /// `true` selects palindromes; any other value selects non-palindromes.
    pub is_palindrome: Option<String>,
    /// Inclusive lower bound on length.
    pub min_length: Option<String>,
    /// Inclusive upper bound on length.
    pub max_length: Option<String>,
    /// Exact number of words.
    pub word_count: Option<String>,
    /// Substring the value must contain (case-insensitive).
    pub contains_character: Option<String>,
}

impl Filter {
    /// Build a filter from explicit query parameters.
    pub fn from_params(params: &FilterParams) -> Result<Self, FilterError> {
        let filter = Self {
            is_palindrome: supplied(&params.is_palindrome).map(|v| v == "true"),
            min_length: parse_int("min_length", supplied(&params.min_length))?,
            max_length: parse_int("max_length", supplied(&params.max_length))?,
            word_count: parse_int("word_count", supplied(&params.word_count))?,
            contains_character: supplied(&params.contains_character).map(str::to_string),
        };

        if filter.is_empty() {
            return Err(FilterError::NoFilterSupplied);
        }

        filter.validate()?;
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.contains_character.is_none()
    }

    /// Reject a filter whose length bounds can never be satisfied.
    pub fn validate(&self) -> Result<(), FilterError> {
        match (self.min_length, self.max_length) {
            (Some(min_length), Some(max_length)) if min_length > max_length => {
                Err(FilterError::ConflictingFilters {
                    min_length,
                    max_length,
                })
            }
            _ => Ok(()),
        }
    }

    /// The non-empty substring predicate, if any.
    pub fn contains(&self) -> Option<&str> {
        self.contains_character.as_deref().filter(|c| !c.is_empty())
    }

    /// Evaluate every present predicate against an entry.
    pub fn matches(&self, entry: &Entry) -> bool {
        let props = &entry.properties;

        if self.is_palindrome.is_some_and(|p| p != props.is_palindrome) {
            return false;
        }
        if self.min_length.is_some_and(|min| props.length < min) {
            return false;
        }
        if self.max_length.is_some_and(|max| props.length > max) {
            return false;
        }
        if self.word_count.is_some_and(|wc| props.word_count != wc) {
            return false;
        }
        if let Some(needle) = self.contains() {
            if !entry
                .value
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }

        true
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_int(field: &'static str, value: Option<&str>) -> Result<Option<i64>, FilterError> {
    value
        .map(|v| v.parse::<i64>().map_err(|_| FilterError::InvalidValue { field }))
        .transpose()
}

/// A phrase lookup together with the filter it was translated into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: Filter,
}
