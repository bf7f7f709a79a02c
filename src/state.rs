use std::sync::Arc;

use crate::application::services::{LinkService, ResolveService};
use crate::config::RedirectStatus;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub resolve_service: Arc<ResolveService<dyn LinkRepository>>,
    /// Kept for the health check; services hold their own handle.
    pub link_repository: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn CacheService>,
    pub redirect_status: RedirectStatus,
    /// Public prefix for `short_url`; `None` omits the field.
    pub base_url: Option<String>,
}
