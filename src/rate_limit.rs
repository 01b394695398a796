//! Per-client sliding-window rate limiting.

use crate::clock::Clock;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default number of requests allowed per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 30;

/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Request accepted and recorded.
    Allowed {
        /// Requests left in the current window.
        remaining: u32,
    },
    /// Request rejected; nothing was recorded.
    Denied {
        /// Time until the oldest recorded request leaves the window.
        retry_after: Duration,
    },
}

impl Admission {
    /// Returns true if the request was accepted.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Rate limiter using a sliding window of accepted request instants.
///
/// Bursts of up to `max_requests` are accepted back-to-back; after that a
/// client is throttled until its oldest request ages out of the window.
#[derive(Debug)]
pub struct RateLimiter {
    /// Accepted request instants per client, oldest first.
    windows: DashMap<String, VecDeque<Instant>>,
    max_requests: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_requests` per `window` per client.
    #[must_use]
    pub fn new(max_requests: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window,
            clock,
        }
    }

    /// Checks whether `client_id` may make a request now, recording it if so.
    pub fn admit(&self, client_id: &str) -> Admission {
        let now = self.clock.now();

        let mut entry = self.windows.entry(client_id.to_string()).or_default();
        let window = entry.value_mut();
        self.prune(window, now);

        if window.len() >= self.max_requests as usize {
            let retry_after = window
                .front()
                .map(|&oldest| (oldest + self.window).saturating_duration_since(now))
                .unwrap_or(self.window);
            return Admission::Denied { retry_after };
        }

        window.push_back(now);
        Admission::Allowed {
            remaining: self.max_requests - window.len() as u32,
        }
    }

    /// Drops clients whose windows are empty once aged-out requests are
    /// removed. Returns the number of clients dropped.
    pub fn prune_idle(&self) -> usize {
        let now = self.clock.now();
        let before = self.windows.len();
        self.windows.retain(|_, window| {
            self.prune(window, now);
            !window.is_empty()
        });
        before.saturating_sub(self.windows.len())
    }

    /// Number of clients currently tracked.
    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Maximum requests per window.
    #[must_use]
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Window length.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    fn prune(&self, window: &mut VecDeque<Instant>, now: Instant) {
        while let Some(&front) = window.front() {
            if now.saturating_duration_since(front) >= self.window {
                window.pop_front();
            } else {
                break;
            }
        }
    }
}
