//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "expiration_days": 7 }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_code": "Ab3kX9",
///   "short_url": "https://s.example.com/Ab3kX9",
///   "expires_at": "2025-06-08T10:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for malformed JSON, an invalid URL or an
/// out-of-range `expiration_days`. Returns 500 if no unique code could be
/// generated or the store is unavailable.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .shorten(&payload.url, payload.expiration_days)
        .await?;

    tracing::info!(code = %link.code, "Short link created");

    Ok(Json(ShortenResponse::from_link(
        link,
        state.base_url.as_deref(),
    )))
}
