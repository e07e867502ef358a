// Common test utilities for integration tests
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Once};

use strands::api::{create_router, AppState};
use strands::config::{Config, DatabaseConfig};
use strands::db::{Database, DatabaseBackend, LibSqlBackend};
use tempfile::TempDir;

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// A running server backed by a throwaway libsql file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/api/v1{}", self.addr, path)
    }
}

pub async fn spawn_app() -> TestApp {
    init_test_logger();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("strands_test.db");

    let mut config = Config::default();
    config.database = DatabaseConfig {
        url: format!("file:{}", db_path.display()),
        auth_token: None,
        local_path: None,
    };

    let db = Database::new(&config.database)
        .await
        .expect("Failed to create database");
    let backend: Arc<dyn DatabaseBackend> = Arc::new(LibSqlBackend::new(db));
    let app = create_router(AppState::new(config, backend));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: reqwest::Client::new(),
        _temp_dir: temp_dir,
    }
}
