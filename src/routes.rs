//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`     - Create a short link (rate limited per IP)
//! - `GET  /health`      - Health check: storage and cache
//! - `GET  /{code}`      - Short link redirect
//!
//! Fixed routes take precedence over `/{code}`; the code generator never
//! emits `health` or `shorten`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Optional browser frontend origin
//! - **Rate limiting** - Per-IP token bucket on `POST /shorten`
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::api::middleware::{cors, rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Errors
///
/// Returns an error if the CORS origin or rate limit settings are invalid.
pub fn app_router(state: AppState, config: &Config) -> Result<NormalizePath<Router>> {
    let shorten_router: Router<AppState> =
        Router::new().route("/shorten", post(shorten_handler));

    let shorten_router = match (config.rate_limit.enabled, config.rate_limit.behind_proxy) {
        (false, _) => shorten_router,
        (true, false) => shorten_router.layer(rate_limit::layer(&config.rate_limit)?),
        (true, true) => shorten_router.layer(rate_limit::proxy_layer(&config.rate_limit)?),
    };

    let router = Router::new()
        .merge(shorten_router)
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(cors::layer(config.cors_allowed_origin.as_deref())?)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
