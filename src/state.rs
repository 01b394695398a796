//! Application state management.

use crate::cache::TtlCache;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::rate_limit::RateLimiter;
use crate::rooms::RoomRegistry;
use market_data_client::{ClientConfig, MarketDataClient};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Application state shared across all handlers.
///
/// Built once per process and handed to the router; nothing here is global.
#[derive(Debug)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Upstream market-data client.
    pub client: MarketDataClient,
    /// Response cache keyed by endpoint and parameters.
    pub cache: TtlCache<Value>,
    /// Per-client request quota.
    pub rate_limiter: RateLimiter,
    /// Realtime room membership.
    pub rooms: RoomRegistry,
}

impl AppState {
    /// Creates application state using the system clock.
    ///
    /// # Errors
    /// Returns error if the upstream client cannot be built.
    pub fn new(config: Config) -> Result<Self, market_data_client::Error> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates application state whose cache and rate limiter read `clock`.
    ///
    /// # Errors
    /// Returns error if the upstream client cannot be built.
    pub fn with_clock(
        config: Config,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, market_data_client::Error> {
        let client = MarketDataClient::new(ClientConfig {
            base_url: config.upstream.base_url.clone(),
            timeout: config.upstream.timeout(),
        })?;
        let cache = TtlCache::new(config.cache.ttl(), Arc::clone(&clock));
        let rate_limiter = RateLimiter::new(
            config.rate_limit.max_requests,
            config.rate_limit.window(),
            clock,
        );

        Ok(Self {
            config,
            client,
            cache,
            rate_limiter,
            rooms: RoomRegistry::new(),
        })
    }

    /// Spawns a task that periodically drops expired cache entries and idle
    /// rate limit windows.
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let state = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let expired = state.cache.purge_expired();
                let idle = state.rate_limiter.prune_idle();
                debug!(expired, idle, "sweep complete");
            }
        })
    }
}
