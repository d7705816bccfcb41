//! # Restock API Server
//!
//! HTTP/JSON server for the Restock inventory-and-sales backend.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  init tracing ──► load config ──► connect SQLite + migrate          │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  build router (CRUD + reports + dashboard, bearer-auth guarded)     │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  axum::serve with graceful shutdown on SIGINT/SIGTERM               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use restock_api::{app, auth::JwtVerifier, config::ApiConfig, AppState};
use restock_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Restock API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        database = %config.database_path,
        "Configuration loaded"
    );

    // Connect to database (creates the file and runs migrations)
    let db_config =
        DbConfig::new(&config.database_path).max_connections(config.max_db_connections);
    let db = Database::new(db_config).await?;
    info!("Connected to SQLite");

    // Build application state and router
    let state = AppState::new(db, JwtVerifier::new(config.jwt_secret.clone()));
    let router = app(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
