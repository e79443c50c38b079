//! Per-client rate limiting.
//!
//! A token bucket keyed on the peer IP: a client may burst up to
//! `RATE_LIMIT_MAX_REQUESTS` requests and regains one request every
//! `window / max` afterwards, so the sustained rate never exceeds the
//! configured maximum per window.
//!
//! Uses actix-governor with the built-in PeerIpKeyExtractor. Responses carry
//! the `x-ratelimit-*` headers.

use std::time::Duration;

use actix_governor::{Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};
use governor::middleware::StateInformationMiddleware;

use crate::config::Settings;

/// Rate limit parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Length of the accounting window.
    pub window: Duration,
    /// Requests allowed per client within one window.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(15 * 60),
            max_requests: 100,
        }
    }
}

impl RateLimitConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            window: settings.rate_limit_window(),
            max_requests: settings.rate_limit_max_requests(),
        }
    }

    /// Interval after which one more request is allowed, at least 1 ms.
    pub fn replenish_interval(&self) -> Duration {
        let max = self.max_requests.max(1);
        (self.window / max).max(Duration::from_millis(1))
    }
}

/// Type alias for the Governor middleware reporting rate limit headers.
pub type RateLimiter = Governor<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Shared limiter state. Clones share the same per-IP buckets.
pub type RateLimitState = GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Build the governor config for `config`.
pub fn governor_config(config: &RateLimitConfig) -> RateLimitState {
    let millis = u64::try_from(config.replenish_interval().as_millis()).unwrap_or(u64::MAX);

    GovernorConfigBuilder::default()
        .milliseconds_per_request(millis)
        .burst_size(config.max_requests.max(1))
        .use_headers()
        .finish()
        .expect("Failed to build rate limiter")
}

/// Create a limiter with its own buckets.
pub fn limiter(config: &RateLimitConfig) -> RateLimiter {
    Governor::new(&governor_config(config))
}
