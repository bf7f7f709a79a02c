//! Short code resolution service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::ShortLink;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::is_valid_code;

/// Outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Live link; redirect to the contained target URL.
    Redirect(String),
    /// The code exists but its expiry has passed.
    Expired,
    /// No record uses this code.
    NotFound,
}

/// Service resolving short codes to their target URLs.
///
/// # Lookup Order
///
/// 1. Reject codes that cannot have been issued (wrong shape)
/// 2. Redirect cache
/// 3. Mapping store, followed by the expiry check
///
/// Resolution never mutates the store.
pub struct ResolveService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    cache: Arc<dyn CacheService>,
    clock: Arc<dyn Clock>,
    cache_ttl_seconds: u64,
}

impl<L: LinkRepository + ?Sized> ResolveService<L> {
    /// Creates a new resolve service.
    ///
    /// `cache_ttl_seconds` is the upper bound for cached entries; links that
    /// expire sooner are cached only until their expiry.
    pub fn new(
        link_repository: Arc<L>,
        cache: Arc<dyn CacheService>,
        clock: Arc<dyn Clock>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            link_repository,
            cache,
            clock,
            cache_ttl_seconds,
        }
    }

    /// Resolves `code` to a [`Resolution`].
    ///
    /// `NotFound` and `Expired` are normal outcomes, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unavailable. Cache
    /// failures fall back to the store.
    pub async fn resolve(&self, code: &str) -> Result<Resolution, AppError> {
        if !is_valid_code(code) {
            debug!("Rejected malformed code");
            return Ok(Resolution::NotFound);
        }

        match self.cache.get_url(code).await {
            Ok(Some(target_url)) => {
                debug!("Cache HIT for {}", code);
                return Ok(Resolution::Redirect(target_url));
            }
            Ok(None) => debug!("Cache MISS for {}", code),
            Err(e) => warn!("Cache error: {}", e),
        }

        let Some(link) = self.link_repository.find_by_code(code).await? else {
            return Ok(Resolution::NotFound);
        };

        let now = self.clock.now();
        if link.is_expired_at(now) {
            debug!("Link {} expired", code);
            return Ok(Resolution::Expired);
        }

        let ttl = self.cache_ttl_for(&link, now);
        if ttl > 0
            && let Err(e) = self.cache.set_url(code, &link.target_url, ttl).await
        {
            warn!("Failed to cache URL: {}", e);
        }

        Ok(Resolution::Redirect(link.target_url))
    }

    /// Whole seconds the mapping may stay cached without outliving the link.
    fn cache_ttl_for(&self, link: &ShortLink, now: DateTime<Utc>) -> u64 {
        match link.expires_at {
            None => self.cache_ttl_seconds,
            Some(expires_at) => {
                let remaining = (expires_at - now).num_seconds();
                if remaining <= 0 {
                    0
                } else {
                    (remaining as u64).min(self.cache_ttl_seconds)
                }
            }
        }
    }
}
