//! Cross-origin access for a browser frontend.

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// Creates a CORS layer allowing `GET`/`POST` with a JSON body from
/// `allowed_origin`.
///
/// Without an origin no CORS headers are emitted, so browsers only allow
/// same-origin calls.
pub fn layer(allowed_origin: Option<&str>) -> Result<CorsLayer> {
    let Some(origin) = allowed_origin else {
        return Ok(CorsLayer::new());
    };

    let origin = origin
        .parse::<HeaderValue>()
        .with_context(|| format!("CORS_ALLOWED_ORIGIN is not a valid header value: {origin}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_accepts_origin() {
        assert!(layer(Some("http://localhost:8080")).is_ok());
        assert!(layer(None).is_ok());
    }

    #[test]
    fn test_layer_rejects_invalid_origin() {
        assert!(layer(Some("http://bad\norigin")).is_err());
    }
}
