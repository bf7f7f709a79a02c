//! HTTP server initialization and runtime setup.
//!
//! Handles storage and cache setup, service wiring, and the Axum server
//! lifecycle.

use crate::application::services::{LinkService, ResolveService};
use crate::config::{Config, StorageBackend};
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::CodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link storage (PostgreSQL with migrations, or in-memory)
/// - Redis cache (or NullCache fallback)
/// - Link and resolve services
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let link_repository = connect_storage(&config).await?;
    let cache = connect_cache(&config).await;

    let state = build_state(&config, link_repository, cache, Arc::new(SystemClock));
    let app = app_router(state, &config)?;

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;
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

/// Wires services into an [`AppState`].
///
/// Shared by [`run`] and the integration tests, which pass their own
/// repository, cache and clock.
pub fn build_state(
    config: &Config,
    link_repository: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    clock: Arc<dyn Clock>,
) -> AppState {
    let link_service = Arc::new(LinkService::new(
        link_repository.clone(),
        CodeGenerator::new(config.code_length),
        clock.clone(),
        config.code_max_attempts,
    ));

    let resolve_service = Arc::new(ResolveService::new(
        link_repository.clone(),
        cache.clone(),
        clock,
        config.cache_ttl_seconds,
    ));

    AppState {
        link_service,
        resolve_service,
        link_repository,
        cache,
        redirect_status: config.redirect_status,
        base_url: config.base_url.clone(),
    }
}

async fn connect_storage(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    let database_url = match (config.storage_backend, &config.database_url) {
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory storage; links are lost on restart");
            return Ok(Arc::new(MemoryLinkRepository::new()));
        }
        (StorageBackend::Postgres, Some(url)) => url,
        (StorageBackend::Postgres, None) => anyhow::bail!("DATABASE_URL is not configured"),
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(Arc::new(PgLinkRepository::new(Arc::new(pool))))
}

/// Connects to Redis when configured. An unreachable Redis disables caching
/// instead of failing startup.
async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
