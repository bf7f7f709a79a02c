//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::config::RateLimitConfig;

pub type RateLimitLayer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a per-IP rate limiter keyed on the socket peer address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The router
/// must be served with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .layer(rate_limit::layer(&config.rate_limit)?);
/// ```
pub fn layer(config: &RateLimitConfig) -> Result<RateLimitLayer<PeerIpKeyExtractor>> {
    build(PeerIpKeyExtractor, config)
}

/// Creates a per-IP rate limiter that trusts `X-Forwarded-For`, `X-Real-IP`
/// and `Forwarded` headers, falling back to the peer address.
///
/// Only use behind a reverse proxy that overwrites these headers.
pub fn proxy_layer(config: &RateLimitConfig) -> Result<RateLimitLayer<SmartIpKeyExtractor>> {
    build(SmartIpKeyExtractor, config)
}

fn build<K: KeyExtractor>(extractor: K, config: &RateLimitConfig) -> Result<RateLimitLayer<K>> {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(extractor)
        .per_second(config.per_second)
        .burst_size(config.burst)
        .finish()
        .context("Invalid rate limit settings: per_second and burst must be non-zero")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
