//! String request/response DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Entry, Filter, InterpretedQuery, PropertySet};
use crate::services::{FilteredEntries, PhraseEntries};

/// Longest string accepted by `POST /strings`, in characters.
pub const MAX_VALUE_CHARS: u64 = 10_000;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /api/v1/strings`.
///
/// `null` or a missing `value` is treated like an empty string.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateStringRequest {
    /// The string to analyze and store.
    #[serde(default)]
    #[validate(length(
        max = MAX_VALUE_CHARS,
        message = "string value exceeds the maximum length"
    ))]
    pub value: Option<String>,
}

/// Query parameters for `GET /api/v1/strings/filter-by-natural-language`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NaturalLanguageQuery {
    /// Free-text description, e.g. "strings longer than 10 characters".
    pub query: Option<String>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// A stored string with its derived properties.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct StringResponse {
    pub id: String,
    pub value: String,
    pub properties: PropertySet,
    pub created_at: DateTime<Utc>,
}

impl From<Entry> for StringResponse {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            value: entry.value,
            properties: entry.properties,
            created_at: entry.created_at,
        }
    }
}

/// Response for `GET /api/v1/strings`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ListStringsResponse {
    pub entries: Vec<StringResponse>,
    pub count: usize,
    pub filters_applied: Filter,
}

impl From<FilteredEntries> for ListStringsResponse {
    fn from(result: FilteredEntries) -> Self {
        Self {
            entries: result.entries.into_iter().map(Into::into).collect(),
            count: result.count,
            filters_applied: result.filters_applied,
        }
    }
}

/// Response for `GET /api/v1/strings/filter-by-natural-language`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct NaturalLanguageResponse {
    pub entries: Vec<StringResponse>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

impl From<PhraseEntries> for NaturalLanguageResponse {
    fn from(result: PhraseEntries) -> Self {
        Self {
            entries: result.entries.into_iter().map(Into::into).collect(),
            count: result.count,
            interpreted_query: result.interpreted_query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_rejects_unknown_fields() {
        let parsed = serde_json::from_str::<CreateStringRequest>(r#"{"value":"a","extra":1}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn create_request_treats_null_as_absent() {
        let req: CreateStringRequest = serde_json::from_str(r#"{"value":null}"#).unwrap();
        assert!(req.value.is_none());
        let req: CreateStringRequest = serde_json::from_str("{}").unwrap();
        assert!(req.value.is_none());
    }

    #[test]
    fn create_request_length_is_counted_in_characters() {
        let at_limit = CreateStringRequest {
            value: Some("é".repeat(MAX_VALUE_CHARS as usize)),
        };
        assert!(at_limit.validate().is_ok());

        let over = CreateStringRequest {
            value: Some("a".repeat(MAX_VALUE_CHARS as usize + 1)),
        };
        assert!(over.validate().is_err());
    }

    #[test]
    fn string_response_uses_snake_case_fields() {
        let entry = Entry::from_input("Hello World").unwrap();
        let json = serde_json::to_value(StringResponse::from(entry)).unwrap();
        assert_eq!(json["value"], "hello world");
        assert_eq!(json["properties"]["word_count"], 2);
        assert!(json["created_at"].is_string());
    }
}
