use std::sync::Arc;

use serde::Serialize;

use crate::analysis::parse_phrase;
use crate::db::DatabaseBackend;
use crate::error::{Result, StrandsError};
use crate::models::{canonical_value, Entry, Filter, FilterParams, InterpretedQuery};

const NOT_FOUND_MESSAGE: &str = "string does not exist in the system";

/// Result of an explicit filter listing.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct FilteredEntries {
    pub entries: Vec<Entry>,
    pub count: usize,
    pub filters_applied: Filter,
}

/// Result of a natural-language listing.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct PhraseEntries {
    pub entries: Vec<Entry>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

/// Entry points the HTTP layer drives. Storage is injected, never global.
pub struct StringService {
    db: Arc<dyn DatabaseBackend>,
}

impl StringService {
    pub fn new(db: Arc<dyn DatabaseBackend>) -> Self {
        Self { db }
    }

    /// Derive properties for `raw` and store it.
    ///
    /// The existence check is a fast path for the common duplicate; the
    /// backend's uniqueness guard decides races.
    pub async fn submit(&self, raw: &str) -> Result<Entry> {
        let entry = Entry::from_input(raw)?;

        if self.db.get_entry_by_value(&entry.value).await?.is_some() {
            tracing::debug!(value = %entry.value, "Rejected duplicate string");
            return Err(StrandsError::AlreadyExists(
                "string already exists in the system".to_string(),
            ));
        }

        self.db.create_entry(&entry).await?;
        tracing::info!(
            id = %entry.id,
            length = entry.properties.length,
            is_palindrome = entry.properties.is_palindrome,
            "Stored string"
        );
        Ok(entry)
    }

    pub async fn lookup(&self, value: &str) -> Result<Entry> {
        let value = require_value(value)?;
        self.db
            .get_entry_by_value(&value)
            .await?
            .ok_or_else(|| StrandsError::NotFound(NOT_FOUND_MESSAGE.to_string()))
    }

    pub async fn remove(&self, value: &str) -> Result<()> {
        let value = require_value(value)?;
        if !self.db.delete_entry_by_value(&value).await? {
            return Err(StrandsError::NotFound(NOT_FOUND_MESSAGE.to_string()));
        }
        tracing::info!(value = %value, "Deleted string");
        Ok(())
    }

    pub async fn list(&self, params: &FilterParams) -> Result<FilteredEntries> {
        let filter = Filter::from_params(params)?;
        let entries = self.db.list_entries(&filter).await?;
        tracing::debug!(count = entries.len(), filter = ?filter, "Listed strings");

        Ok(FilteredEntries {
            count: entries.len(),
            entries,
            filters_applied: filter,
        })
    }

    pub async fn list_by_phrase(&self, phrase: &str) -> Result<PhraseEntries> {
        let filter = parse_phrase(phrase)?;
        let entries = self.db.list_entries(&filter).await?;
        tracing::debug!(count = entries.len(), query = %phrase, "Listed strings by phrase");

        Ok(PhraseEntries {
            count: entries.len(),
            entries,
            interpreted_query: InterpretedQuery {
                original: phrase.to_string(),
                parsed_filters: filter,
            },
        })
    }
}

fn require_value(value: &str) -> Result<String> {
    let value = canonical_value(value);
    if value.is_empty() {
        return Err(StrandsError::Validation("string value is required".to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryBackend;
    use crate::models::FilterError;
    use pretty_assertions::assert_eq;

    fn service() -> StringService {
        StringService::new(Arc::new(InMemoryBackend::new()))
    }

    async fn seeded(inputs: &[&str]) -> StringService {
        let service = service();
        for input in inputs {
            service.submit(input).await.unwrap();
        }
        service
    }

    #[tokio::test]
    async fn test_submit_derives_from_trimmed_input() {
        let service = service();
        let entry = service.submit("  Race car  ").await.unwrap();

        assert_eq!(entry.value, "race car");
        assert_eq!(entry.properties.length, 8);
        assert_eq!(entry.properties.word_count, 2);
        assert!(entry.properties.is_palindrome);
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_and_duplicate() {
        let service = service();
        assert!(matches!(
            service.submit("   ").await,
            Err(StrandsError::EmptyInput)
        ));

        service.submit("Hello").await.unwrap();
        assert!(matches!(
            service.submit("hello").await,
            Err(StrandsError::AlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_lookup_and_remove() {
        let service = seeded(&["Level"]).await;

        assert_eq!(service.lookup(" LEVEL ").await.unwrap().value, "level");

        service.remove("level").await.unwrap();
        assert!(matches!(
            service.remove("level").await,
            Err(StrandsError::NotFound(_))
        ));
        assert!(matches!(
            service.lookup("level").await,
            Err(StrandsError::NotFound(_))
        ));
        assert!(matches!(
            service.lookup("  ").await,
            Err(StrandsError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_list_reports_applied_filters() {
        let service = seeded(&["ab", "abc", "abcde", "abcdefg"]).await;
        let params = FilterParams {
            min_length: Some("3".into()),
            max_length: Some("5".into()),
            ..Default::default()
        };

        let result = service.list(&params).await.unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(result.filters_applied.min_length, Some(3));
        assert_eq!(result.filters_applied.max_length, Some(5));
    }

    #[tokio::test]
    async fn test_list_errors() {
        let service = service();

        let err = service.list(&FilterParams::default()).await.unwrap_err();
        assert!(matches!(
            err,
            StrandsError::Filter(FilterError::NoFilterSupplied)
        ));

        let params = FilterParams {
            min_length: Some("5".into()),
            max_length: Some("3".into()),
            ..Default::default()
        };
        let err = service.list(&params).await.unwrap_err();
        assert!(matches!(
            err,
            StrandsError::Filter(FilterError::ConflictingFilters { .. })
        ));

        let params = FilterParams {
            word_count: Some("two".into()),
            ..Default::default()
        };
        let err = service.list(&params).await.unwrap_err();
        assert!(matches!(
            err,
            StrandsError::Filter(FilterError::InvalidValue { field: "word_count" })
        ));
    }

    #[tokio::test]
    async fn test_list_by_phrase() {
        let service = seeded(&["noon", "racecar level", "hello", "zebra"]).await;

        let result = service
            .list_by_phrase("Single word palindromic strings")
            .await
            .unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.entries[0].value, "noon");
        assert_eq!(
            result.interpreted_query.original,
            "Single word palindromic strings"
        );
        assert_eq!(
            result.interpreted_query.parsed_filters,
            Filter {
                is_palindrome: Some(true),
                word_count: Some(1),
                ..Default::default()
            }
        );

        let result = service
            .list_by_phrase("strings containing the letter z")
            .await
            .unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.entries[0].value, "zebra");

        assert!(matches!(
            service.list_by_phrase("show me something").await,
            Err(StrandsError::Filter(FilterError::Unparsable(_)))
        ));
        assert!(matches!(
            service.list_by_phrase("  ").await,
            Err(StrandsError::Filter(FilterError::EmptyQuery))
        ));
    }
}
