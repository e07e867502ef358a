//! Process-local entry store.
//!
//! Nothing is persisted; everything is gone when the process exits. Used for
//! `DATABASE_URL=memory:` and throughout the test suites.

use crate::db::traits::{DatabaseBackend, EntryStore};
use crate::error::{Result, StrandsError};
use crate::models::{canonical_value, Entry, Filter};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Entries keyed by canonical value.
///
/// The write lock is held across the existence check and the insert, so two
/// concurrent creates for the same value cannot both win.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    entries: RwLock<BTreeMap<String, Entry>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for InMemoryBackend {
    async fn create_entry(&self, entry: &Entry) -> Result<()> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.value) {
            return Err(StrandsError::AlreadyExists(
                "string already exists in the system".to_string(),
            ));
        }
        entries.insert(entry.value.clone(), entry.clone());
        Ok(())
    }

    async fn get_entry_by_value(&self, value: &str) -> Result<Option<Entry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&canonical_value(value)).cloned())
    }

    async fn delete_entry_by_value(&self, value: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(&canonical_value(value)).is_some())
    }

    async fn list_entries(&self, filter: &Filter) -> Result<Vec<Entry>> {
        let entries = self.entries.read().await;
        let mut matched: Vec<Entry> = entries
            .values()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(matched)
    }
}

#[async_trait]
impl DatabaseBackend for InMemoryBackend {
    async fn sync(&self) -> Result<()> {
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
