//! Farm Management Platform - Backend Server

use std::{net::SocketAddr, sync::Arc};

use agro_backend::config::{Config, StorageBackend};
use agro_backend::{create_app, AppState, KeyValueStore, MemoryStore, PgStore};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing; JSON lines outside development
    let json_logs = !config.is_development();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agro_server=debug,agro_backend=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .init();

    tracing::info!("Starting Farm Management Server");
    tracing::info!("Environment: {}", config.environment);

    let store = open_store(&config).await?;
    tracing::info!("Collections stored in {}", store.backend_name());

    // Create application state
    let state = AppState::new(store, config.clone());

    // Build application
    let app = create_app(state);

    // Start server
    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server host {}", config.server.host))?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the configured collection store
async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let store = PgStore::connect(&config.storage).await?;
            tracing::info!("Database connection established");

            // Run migrations in development
            if config.is_development() {
                tracing::info!("Running database migrations...");
                store.migrate().await?;
                tracing::info!("Migrations completed");
            }

            Ok(Arc::new(store))
        }
    }
}
