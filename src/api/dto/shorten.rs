//! DTOs for the shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortLink;

/// Request to shorten a single URL.
///
/// Scheme and host checks happen in the service; the checks here catch
/// obviously bad input before it gets that far.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Absolute `http`/`https` URL to redirect to. Stored verbatim.
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,

    /// Days until the link stops resolving. Omit for a link that never expires.
    #[validate(range(
        min = 1,
        max = 365,
        message = "expiration_days must be between 1 and 365"
    ))]
    pub expiration_days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,

    /// Full short URL; present only when a public base URL is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortenResponse {
    pub fn from_link(link: ShortLink, base_url: Option<&str>) -> Self {
        let short_url =
            base_url.map(|base| format!("{}/{}", base.trim_end_matches('/'), link.code));

        Self {
            short_code: link.code,
            short_url,
            expires_at: link.expires_at,
        }
    }
}
