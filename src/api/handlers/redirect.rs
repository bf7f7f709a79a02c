//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - **302 Found** (or **301** when configured) with `Location` set to the
///   stored URL
/// - **404 Not Found** for unknown, malformed and expired codes alike
///
/// # Errors
///
/// Returns 500 if the store is unavailable.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.resolve_service.resolve(&code).await? {
        Resolution::Redirect(target_url) => {
            let location = HeaderValue::try_from(target_url.as_str()).map_err(|_| {
                AppError::internal(
                    "Stored URL is not a valid Location header",
                    json!({ "code": code }),
                )
            })?;

            Ok((
                state.redirect_status.status_code(),
                [(header::LOCATION, location)],
            )
                .into_response())
        }
        resolution @ (Resolution::Expired | Resolution::NotFound) => {
            debug!(?resolution, "No live link for {}", code);
            Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ))
        }
    }
}
