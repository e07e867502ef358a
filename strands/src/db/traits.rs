use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Entry, Filter};

/// Persistence contract for entries.
///
/// Implementations own uniqueness: two concurrent `create_entry` calls for
/// the same canonical value must not both succeed.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Insert an entry with its properties. Fails with `AlreadyExists` when
    /// the canonical value is taken.
    async fn create_entry(&self, entry: &Entry) -> Result<()>;

    /// Case-insensitive lookup by value.
    async fn get_entry_by_value(&self, value: &str) -> Result<Option<Entry>>;

    /// Remove an entry and its properties. Returns `false` if nothing matched.
    async fn delete_entry_by_value(&self, value: &str) -> Result<bool>;

    /// Every entry satisfying all present predicates of `filter`.
    async fn list_entries(&self, filter: &Filter) -> Result<Vec<Entry>>;
}

/// A complete storage backend: the entry store plus lifecycle operations.
#[async_trait]
pub trait DatabaseBackend: EntryStore {
    /// Sync with remote (e.g. Turso replication). No-op for local-only backends.
    async fn sync(&self) -> Result<()>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> Result<()>;
}
