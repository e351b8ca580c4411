//! # FoodHub API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Startup / Shutdown                               │
//! │                                                                         │
//! │  init_tracing ─► ApiConfig::load ─► Database::new (migrations)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  axum::serve(listener, app) ◄── requests                                │
//! │       │                                                                 │
//! │  SIGINT / SIGTERM ─► stop accepting, drain in-flight requests           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::close                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use foodhub_api::{create_app, ApiConfig, AppState};
use foodhub_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting FoodHub API server...");

    let config = ApiConfig::load()?;
    info!(
        addr = %config.addr(),
        db_path = %config.database_path.display(),
        max_connections = config.db_max_connections,
        request_timeout_secs = config.request_timeout_secs,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config())
        .await
        .context("failed to open the order database")?;

    let app = create_app(AppState::new(db.clone()), config.request_timeout());

    let listener = TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;
    info!(addr = %config.addr(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    info!("Server shut down gracefully");
    Ok(())
}

/// Initializes logging with `RUST_LOG`, falling back to a sensible default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,foodhub=debug,tower_http=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Waits for Ctrl+C or SIGTERM.
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
