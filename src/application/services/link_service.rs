//! Short link creation service.

use std::sync::Arc;

use chrono::Duration;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::{NewLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_validator::validate_target_url;

/// Smallest accepted `expiration_days`.
pub const MIN_EXPIRATION_DAYS: i64 = 1;

/// Largest accepted `expiration_days`.
pub const MAX_EXPIRATION_DAYS: i64 = 365;

/// Service for creating short links.
///
/// Validates input (the client-side checks are repeated here), draws codes
/// from the [`CodeGenerator`] and persists them through the repository's
/// insert-if-absent, regenerating on collision.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    generator: CodeGenerator,
    clock: Arc<dyn Clock>,
    max_attempts: usize,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `max_attempts` bounds how many candidate codes are tried per request;
    /// values below 1 are treated as 1.
    pub fn new(
        link_repository: Arc<L>,
        generator: CodeGenerator,
        clock: Arc<dyn Clock>,
        max_attempts: usize,
    ) -> Self {
        Self {
            link_repository,
            generator,
            clock,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Creates a short link for `url`, optionally expiring after
    /// `expiration_days` days.
    ///
    /// The URL is stored exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `url` is empty, malformed, or not `http`/`https`
    /// - `expiration_days` is outside `1..=365`
    ///
    /// Returns [`AppError::Internal`] if every candidate code collided or the
    /// store is unavailable. Store failures are not retried.
    pub async fn shorten(
        &self,
        url: &str,
        expiration_days: Option<i64>,
    ) -> Result<ShortLink, AppError> {
        validate_target_url(url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        if let Some(days) = expiration_days
            && !(MIN_EXPIRATION_DAYS..=MAX_EXPIRATION_DAYS).contains(&days)
        {
            return Err(AppError::bad_request(
                format!(
                    "expiration_days must be between {} and {}",
                    MIN_EXPIRATION_DAYS, MAX_EXPIRATION_DAYS
                ),
                json!({ "expiration_days": days }),
            ));
        }

        let created_at = self.clock.now();
        let expires_at = expiration_days.map(|days| created_at + Duration::days(days));

        for attempt in 1..=self.max_attempts {
            let new_link = NewLink {
                code: self.generator.generate(),
                target_url: url.to_string(),
                created_at,
                expires_at,
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    debug!(code = %link.code, attempt, "Short link created");
                    return Ok(link);
                }
                Err(e) if e.is_conflict() => {
                    debug!(attempt, "Short code collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = self.max_attempts,
            "Gave up generating a unique short code"
        );

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": self.max_attempts }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::is_valid_code;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fixed_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
        ))
    }

    fn service(repo: MockLinkRepository, max_attempts: usize) -> LinkService<MockLinkRepository> {
        LinkService::new(
            Arc::new(repo),
            CodeGenerator::default(),
            fixed_clock(),
            max_attempts,
        )
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .withf(|new_link| new_link.target_url == "https://example.com")
            .times(1)
            .returning(|new_link| Ok(ShortLink::from(new_link)));

        let link = service(mock_link_repo, 10)
            .shorten("https://example.com", None)
            .await
            .unwrap();

        assert!(is_valid_code(&link.code));
        assert_eq!(link.target_url, "https://example.com");
        assert!(link.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_shorten_keeps_url_verbatim() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .withf(|new_link| new_link.target_url == "HTTPS://Example.COM:443/Path#frag")
            .times(1)
            .returning(|new_link| Ok(ShortLink::from(new_link)));

        let link = service(mock_link_repo, 10)
            .shorten("HTTPS://Example.COM:443/Path#frag", None)
            .await
            .unwrap();

        assert_eq!(link.target_url, "HTTPS://Example.COM:443/Path#frag");
    }

    #[tokio::test]
    async fn test_shorten_sets_expiry_from_clock() {
        let clock = fixed_clock();
        let now = clock.now();

        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .times(1)
            .returning(|new_link| Ok(ShortLink::from(new_link)));

        let service = LinkService::new(
            Arc::new(mock_link_repo),
            CodeGenerator::default(),
            clock,
            10,
        );

        let link = service
            .shorten("https://example.com", Some(7))
            .await
            .unwrap();

        assert_eq!(link.created_at, now);
        assert_eq!(link.expires_at, Some(now + Duration::days(7)));
    }

    #[tokio::test]
    async fn test_shorten_accepts_expiration_bounds() {
        for days in [MIN_EXPIRATION_DAYS, MAX_EXPIRATION_DAYS] {
            let mut mock_link_repo = MockLinkRepository::new();
            mock_link_repo
                .expect_create()
                .times(1)
                .returning(|new_link| Ok(ShortLink::from(new_link)));

            let result = service(mock_link_repo, 10)
                .shorten("https://example.com", Some(days))
                .await;

            assert!(result.is_ok(), "days = {days}");
        }
    }

    #[tokio::test]
    async fn test_shorten_rejects_out_of_range_expiration() {
        for days in [0, -1, 366, i64::MAX, i64::MIN] {
            let mut mock_link_repo = MockLinkRepository::new();
            mock_link_repo.expect_create().times(0);

            let result = service(mock_link_repo, 10)
                .shorten("https://example.com", Some(days))
                .await;

            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "days = {days}"
            );
        }
    }

    #[tokio::test]
    async fn test_shorten_rejects_invalid_urls() {
        for url in [
            "",
            "not-a-url",
            "ftp://example.com",
            "javascript:alert(1)",
            " https://example.com",
        ] {
            let mut mock_link_repo = MockLinkRepository::new();
            mock_link_repo.expect_create().times(0);

            let result = service(mock_link_repo, 10).shorten(url, Some(7)).await;

            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "url = {url:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_shorten_retries_on_collision() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_mock = calls.clone();

        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .times(3)
            .returning(move |new_link| {
                if calls_in_mock.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(AppError::conflict("dup", json!({})))
                } else {
                    Ok(ShortLink::from(new_link))
                }
            });

        let result = service(mock_link_repo, 10)
            .shorten("https://example.com", None)
            .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_shorten_generation_exhausted() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .times(3)
            .returning(|_| Err(AppError::conflict("dup", json!({}))));

        let result = service(mock_link_repo, 3)
            .shorten("https://example.com", None)
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
        assert!(err.to_string().contains("unique code"));
    }

    #[tokio::test]
    async fn test_shorten_store_failure_not_retried() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::internal("Storage unavailable", json!({}))));

        let result = service(mock_link_repo, 10)
            .shorten("https://example.com", None)
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_zero_max_attempts_still_tries_once() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .times(1)
            .returning(|new_link| Ok(ShortLink::from(new_link)));

        let result = service(mock_link_repo, 0)
            .shorten("https://example.com", None)
            .await;

        assert!(result.is_ok());
    }
}
