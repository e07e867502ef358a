use libsql::{Builder, Connection};
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::error::{Result, StrandsError};

use super::schema;

/// Handle to a libsql database (local file, remote, or embedded replica).
#[derive(Clone)]
pub struct Database {
    pub(crate) db: Arc<libsql::Database>,
    journal_mode: &'static str,
    connection_pragmas: Arc<Vec<(&'static str, String)>>,
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let remote = config.url.starts_with("libsql://") || config.url.starts_with("https://");
        let db = if remote {
            let auth_token = config.auth_token.clone().unwrap_or_default();
            match config.local_path {
                Some(ref local_path) => {
                    Builder::new_remote_replica(local_path, config.url.clone(), auth_token)
                        .build()
                        .await?
                }
                None => {
                    Builder::new_remote(config.url.clone(), auth_token)
                        .build()
                        .await?
                }
            }
        } else if config.is_in_process() {
            return Err(StrandsError::Internal(format!(
                "{} is served by the in-process store, not libsql",
                config.url
            )));
        } else {
            let path = config.url.strip_prefix("file:").unwrap_or(&config.url);
            Builder::new_local(path).build().await?
        };

        // Remote primaries manage their own pragmas.
        let managed_remotely = remote && config.local_path.is_none();
        let connection_pragmas = if managed_remotely {
            Vec::new()
        } else {
            connection_pragmas_from_env()
        };

        let database = Self {
            db: Arc::new(db),
            journal_mode: journal_mode_from_env(),
            connection_pragmas: Arc::new(connection_pragmas),
        };
        if !managed_remotely {
            database.configure_database().await?;
        }
        database.init_schema().await?;

        Ok(database)
    }

    /// Open a connection with the per-connection pragmas applied.
    pub async fn connect(&self) -> Result<Connection> {
        let conn = self.db.connect()?;

        for (name, value) in self.connection_pragmas.iter() {
            let sql = format!("PRAGMA {name} = {value}");
            if let Err(error) = conn.execute_batch(&sql).await {
                tracing::warn!(pragma = name, value = %value, error = %error, "Failed to set SQLite pragma");
            }
        }

        Ok(conn)
    }

    /// Database-wide settings, applied once at startup.
    async fn configure_database(&self) -> Result<()> {
        let conn = self.db.connect()?;

        let journal_sql = format!("PRAGMA journal_mode = {}", self.journal_mode);
        if let Err(error) = conn.execute_batch(&journal_sql).await {
            tracing::warn!(
                mode = %self.journal_mode,
                error = %error,
                "Failed to set SQLite journal_mode"
            );
        }

        Ok(())
    }

    async fn init_schema(&self) -> Result<()> {
        let conn = self.connect().await?;
        schema::init_schema(&conn).await
    }

    pub async fn sync(&self) -> Result<()> {
        if let Ok(sync) = self.db.sync().await {
            tracing::info!("Database synced: {:?}", sync);
        }
        Ok(())
    }
}

fn journal_mode_from_env() -> &'static str {
    normalize_journal_mode(
        &std::env::var("DATABASE_JOURNAL_MODE").unwrap_or_else(|_| "WAL".to_string()),
    )
}

/// Pragmas scoped to a single connection; these must be set on every open.
fn connection_pragmas_from_env() -> Vec<(&'static str, String)> {
    let busy_timeout_ms = std::env::var("DATABASE_BUSY_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(5000);
    let synchronous = normalize_synchronous(
        &std::env::var("DATABASE_SYNCHRONOUS").unwrap_or_else(|_| "NORMAL".to_string()),
    );

    vec![
        ("busy_timeout", busy_timeout_ms.to_string()),
        ("synchronous", synchronous.to_string()),
        ("foreign_keys", "ON".to_string()),
    ]
}

fn normalize_journal_mode(value: &str) -> &'static str {
    match value.trim().to_uppercase().as_str() {
        "DELETE" => "DELETE",
        "TRUNCATE" => "TRUNCATE",
        "PERSIST" => "PERSIST",
        "MEMORY" => "MEMORY",
        "OFF" => "OFF",
        _ => "WAL",
    }
}

fn normalize_synchronous(value: &str) -> &'static str {
    match value.trim().to_uppercase().as_str() {
        "OFF" => "OFF",
        "FULL" => "FULL",
        "EXTRA" => "EXTRA",
        _ => "NORMAL",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journal_mode_falls_back_to_wal() {
        assert_eq!(normalize_journal_mode("delete"), "DELETE");
        assert_eq!(normalize_journal_mode(" wal "), "WAL");
        assert_eq!(normalize_journal_mode("nonsense"), "WAL");
    }

    #[test]
    fn synchronous_falls_back_to_normal() {
        assert_eq!(normalize_synchronous("full"), "FULL");
        assert_eq!(normalize_synchronous(""), "NORMAL");
    }

    #[test]
    fn journal_mode_is_not_a_connection_pragma() {
        let names: Vec<&str> = connection_pragmas_from_env()
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(names, vec!["busy_timeout", "synchronous", "foreign_keys"]);
    }

    #[tokio::test]
    async fn in_process_url_is_rejected() {
        let config = DatabaseConfig {
            url: "memory:".to_string(),
            auth_token: None,
            local_path: None,
        };
        assert!(matches!(
            Database::new(&config).await,
            Err(StrandsError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn local_file_database_initializes_schema() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("file:{}", dir.path().join("strands.db").display()),
            auth_token: None,
            local_path: None,
        };
        let db = Database::new(&config).await.unwrap();
        let conn = db.connect().await.unwrap();

        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('strings', 'string_properties')",
                (),
            )
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 2);
    }

    #[tokio::test]
    async fn startup_sets_journal_mode_and_connections_get_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("file:{}", dir.path().join("pragmas.db").display()),
            auth_token: None,
            local_path: None,
        };
        let db = Database::new(&config).await.unwrap();

        // journal_mode persists in the file, so a bare connection sees it.
        let raw = db.db.connect().unwrap();
        let mut rows = raw.query("PRAGMA journal_mode", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(
            row.get::<String>(0).unwrap().to_uppercase(),
            journal_mode_from_env()
        );

        let conn = db.connect().await.unwrap();
        let mut rows = conn.query("PRAGMA foreign_keys", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }
}
