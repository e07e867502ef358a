use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use strands::api::{create_router, AppState};
use strands::config::{Config, LogFormat};
use strands::db::{Database, DatabaseBackend, InMemoryBackend, LibSqlBackend};

#[derive(Parser)]
#[command(name = "strands")]
#[command(about = "String analysis service: derive properties, store, and filter strings")]
struct Args {
    /// Address to bind (overrides STRANDS_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides STRANDS_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// `file:<path>`, `memory:` or a libsql remote URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }

    init_tracing(config.logging.format);

    let db: Arc<dyn DatabaseBackend> = if config.database.is_in_process() {
        tracing::warn!("Using the in-memory store; strings are lost on exit");
        Arc::new(InMemoryBackend::new())
    } else {
        tracing::info!("Initializing database...");
        let raw_db = Database::new(&config.database).await?;
        Arc::new(LibSqlBackend::new(raw_db))
    };
    db.sync().await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = create_router(AppState::new(config, db));

    tracing::info!("Strands starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI JSON: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "strands=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
