use crate::db::connection::Database;
use crate::db::repository::EntryRepository;
use crate::db::traits::{DatabaseBackend, EntryStore};
use crate::error::Result;
use crate::models::{Entry, Filter};
use async_trait::async_trait;

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntryStore for LibSqlBackend {
    async fn create_entry(&self, entry: &Entry) -> Result<()> {
        let conn = self.db.connect().await?;
        EntryRepository::create(&conn, entry).await
    }
    async fn get_entry_by_value(&self, value: &str) -> Result<Option<Entry>> {
        let conn = self.db.connect().await?;
        EntryRepository::get_by_value(&conn, value).await
    }
    async fn delete_entry_by_value(&self, value: &str) -> Result<bool> {
        let conn = self.db.connect().await?;
        EntryRepository::delete_by_value(&conn, value).await
    }
    async fn list_entries(&self, filter: &Filter) -> Result<Vec<Entry>> {
        let conn = self.db.connect().await?;
        EntryRepository::list(&conn, filter).await
    }
}

#[async_trait]
impl DatabaseBackend for LibSqlBackend {
    async fn sync(&self) -> Result<()> {
        self.db.sync().await
    }

    async fn ping(&self) -> Result<()> {
        let conn = self.db.connect().await?;
        conn.query("SELECT 1", ()).await?;
        Ok(())
    }
}
