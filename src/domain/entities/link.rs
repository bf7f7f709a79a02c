//! Short link entity representing a code → URL mapping.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// Records are immutable once created. Expiry is a read-time check: an
/// expired record stays in the store and keeps its code reserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        code: String,
        target_url: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            code,
            target_url,
            created_at,
            expires_at,
        }
    }

    /// Returns true if the link is expired at `now`.
    ///
    /// The boundary is inclusive: a link whose `expires_at` equals `now` is
    /// already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<NewLink> for ShortLink {
    fn from(new_link: NewLink) -> Self {
        ShortLink::new(
            new_link.code,
            new_link.target_url,
            new_link.created_at,
            new_link.expires_at,
        )
    }
}
