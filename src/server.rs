//! HTTP server initialization and runtime setup.
//!
//! Builds the storage backend, wires services into [`AppState`] and runs the
//! Axum server until Ctrl+C.

use crate::api::middleware::rate_limit;
use crate::config::{Config, StorageBackend};
use crate::domain::clock::SystemClock;
use crate::infrastructure::persistence::{
    InMemoryRepository, PgOwnerRepository, PgPetTypeRepository, PgVetRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens a PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if no database URL is configured or the connection fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let url = config
        .database_url
        .as_deref()
        .context("Database URL is not configured")?;

    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(url)
        .await
        .context("Failed to connect to database")
}

/// Builds application state for the configured storage backend.
///
/// For PostgreSQL, pending migrations are applied first.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let clock = Arc::new(SystemClock);

    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_pool(config).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations applied");

            let pool = Arc::new(pool);
            Ok(AppState::new(
                Arc::new(PgOwnerRepository::new(pool.clone())),
                Arc::new(PgPetTypeRepository::new(pool.clone())),
                Arc::new(PgVetRepository::new(pool)),
                clock,
                config.page_size,
                StorageBackend::Postgres.as_str(),
            ))
        }
        StorageBackend::Memory => {
            let repository = InMemoryRepository::with_sample_data()
                .context("Failed to seed in-memory store")?;
            tracing::warn!("Using in-memory storage; data is lost on exit");
            Ok(AppState::in_memory(
                Arc::new(repository),
                clock,
                config.page_size,
            ))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Storage initialization fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let limiter = rate_limit::layer(config.rate_limit_per_second, config.rate_limit_burst)?;
    let app = app_router(state, Some(limiter));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
