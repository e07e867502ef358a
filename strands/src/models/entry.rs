use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::analysis::derive_properties;
use crate::error::{Result, StrandsError};

/// Per-character occurrence counts, keyed by the lowercased character.
pub type CharacterFrequency = BTreeMap<String, i64>;

/// Structural metadata derived once from an accepted string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PropertySet {
    pub length: i64,
    pub word_count: i64,
    pub unique_characters: i64,
    #[schema(value_type = Object)]
    pub character_frequency: CharacterFrequency,
    pub is_palindrome: bool,
    /// SHA-256 of the trimmed input, lowercase hex.
    pub content_hash: String,
}

/// One stored string and its derived properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Entry {
    pub id: String,
    /// Canonical form: trimmed and lowercased. Unique across the store.
    pub value: String,
    pub properties: PropertySet,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Build a new entry from raw input.
    ///
    /// Properties are derived from the trimmed string *before* case folding,
    /// while `value` holds the folded canonical form.
    pub fn from_input(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StrandsError::EmptyInput);
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            value: canonical_value(trimmed),
            properties: derive_properties(trimmed),
            created_at: Utc::now(),
        })
    }
}

/// Storage identity key for a string: trimmed, then lowercased.
pub fn canonical_value(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_input_folds_value_but_not_properties() {
        let entry = Entry::from_input("  Race Car ").unwrap();
        assert_eq!(entry.value, "race car");
        assert_eq!(entry.properties.length, 8);
        assert_eq!(entry.properties.word_count, 2);
        assert!(entry.properties.is_palindrome);
        assert_eq!(
            entry.properties.content_hash,
            crate::analysis::content_hash("Race Car")
        );
    }

    #[test]
    fn from_input_rejects_blank() {
        assert!(matches!(
            Entry::from_input("   \t\n"),
            Err(StrandsError::EmptyInput)
        ));
        assert!(matches!(Entry::from_input(""), Err(StrandsError::EmptyInput)));
    }

    #[test]
    fn from_input_generates_distinct_ids() {
        let a = Entry::from_input("hello").unwrap();
        let b = Entry::from_input("hello").unwrap();
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn canonical_value_trims_and_folds() {
        assert_eq!(canonical_value("  HeLLo World "), "hello world");
    }

    #[test]
    fn entry_serializes_snake_case_fields() {
        let entry = Entry::from_input("aabb").unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["value"], "aabb");
        assert_eq!(json["properties"]["unique_characters"], 2);
        assert_eq!(json["properties"]["character_frequency"]["a"], 2);
        assert!(json["created_at"].is_string());
    }
}
