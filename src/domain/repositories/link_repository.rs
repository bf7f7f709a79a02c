//! Repository trait for the code → URL mapping store.

use crate::domain::entities::{NewLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for short links.
///
/// # Guarantees
///
/// - [`create`](Self::create) is an atomic insert-if-absent: no partial record
///   is ever visible, and of two concurrent inserts with the same code exactly
///   one succeeds.
/// - [`find_by_code`](Self::find_by_code) matches the code exactly, with no
///   case folding and no prefix matching.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Stores a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if any record, live or expired, already
    /// uses the code.
    ///
    /// Returns [`AppError::Internal`] if the store is unavailable.
    async fn create(&self, new_link: NewLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its short code.
    ///
    /// Expired records are returned as well; expiry is decided by the caller.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unavailable.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unavailable.
    async fn ping(&self) -> Result<(), AppError>;
}
