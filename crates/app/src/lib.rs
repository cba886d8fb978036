//! Laminas application composition root
//!
//! Selects the storage backend and composes the domain router into a single
//! application.

use axum::Router;
use laminas_collection::{CollectionRepositories, CollectionState};
use laminas_common::{Config, StorageBackend};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Build the collection repositories for the configured backend.
///
/// The postgres backend connects, then applies pending migrations.
pub async fn build_repositories(config: &Config) -> anyhow::Result<CollectionRepositories> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                anyhow::anyhow!("DATABASE_URL is required for the postgres storage backend")
            })?;

            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(url)
                .await
                .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;
            info!(
                max_connections = config.database_max_connections,
                "Database connection established"
            );

            sqlx::migrate!("../../migrations").run(&pool).await?;
            info!("Database migrations applied");

            Ok(CollectionRepositories::postgres(pool))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage backend");
            Ok(CollectionRepositories::in_memory())
        }
    }
}

/// Create the main application router with all routes
pub fn create_app(repos: CollectionRepositories) -> Router {
    let state = CollectionState::new(&repos);

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Laminas API v0.0.1-SNAPSHOT" }),
        )
        .merge(laminas_collection::routes().with_state(state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
