#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use shortlink_backend::config::Config;
use shortlink_backend::domain::clock::ManualClock;
use shortlink_backend::domain::entities::NewLink;
use shortlink_backend::domain::repositories::LinkRepository;
use shortlink_backend::infrastructure::cache::{CacheService, NullCache};
use shortlink_backend::infrastructure::persistence::MemoryLinkRepository;
use shortlink_backend::server::build_state;
use shortlink_backend::state::AppState;
use std::sync::Arc;

pub struct TestContext {
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    pub repo: Arc<MemoryLinkRepository>,
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
}

/// Defaults with rate limiting off, so routers work without `ConnectInfo`.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.rate_limit.enabled = false;
    config
}

pub fn create_test_state(config: &Config) -> TestContext {
    create_test_state_with_cache(config, Arc::new(NullCache::new()))
}

pub fn create_test_state_with_cache(config: &Config, cache: Arc<dyn CacheService>) -> TestContext {
    let clock = Arc::new(ManualClock::new(start_time()));
    let repo = Arc::new(MemoryLinkRepository::new());

    let state = build_state(config, repo.clone(), cache, clock.clone());

    TestContext { state, clock, repo }
}

pub async fn create_test_link(
    repo: &MemoryLinkRepository,
    code: &str,
    url: &str,
    expires_at: Option<DateTime<Utc>>,
) {
    repo.create(NewLink {
        code: code.to_string(),
        target_url: url.to_string(),
        created_at: start_time(),
        expires_at,
    })
    .await
    .unwrap();
}
