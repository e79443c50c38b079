//! Service configuration derived from environment variables.
//!
//! Configuration is loaded once at startup and validated before the service starts.
//!
//! ## Environment Variables
//!
//! - `PORT`: HTTP port (default: 3000)
//! - `HOST`: Bind address (default: :: for dual-stack IPv4/IPv6)
//! - `API_KEY`: Shared secret expected in the `x-api-key` header
//! - `API_KEY_REQUIRED`: Refuse to start without `API_KEY` (implied in production)
//! - `BODY_LIMIT_KB`: JSON body limit in KiB (default: 1024)
//! - `RATE_LIMIT_WINDOW_SECS`: Rate limit window (default: 900)
//! - `RATE_LIMIT_MAX_REQUESTS`: Requests per window per client IP (default: 100)
//! - `JWE_ALLOWED_ALGS`: Comma-separated `alg` allow-list
//! - `JWE_ALLOWED_ENCS`: Comma-separated `enc` allow-list
//! - `RUST_LOG`: Log level filter
//! - `LOG_FORMAT`: `json` for JSON log lines (default: plain text)

use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use crate::jwe::AlgorithmPolicy;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BODY_LIMIT_KB: usize = 1024;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 100;

/// Value shipped in the sample `.env`; treated as if no key were set.
pub const PLACEHOLDER_API_KEY: &str = "sua-chave-secreta";

/// Check if a string value is truthy.
fn is_truthy(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "yes")
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    port: u16,
    host: IpAddr,
    api_key: Option<String>,
    api_key_placeholder: bool,
    api_key_required: bool,
    body_limit_bytes: usize,
    rate_limit_window_secs: u64,
    rate_limit_max_requests: u32,
    allowed_algs: Option<String>,
    allowed_encs: Option<String>,
}

impl Settings {
    /// Load settings from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).unwrap_or_default().trim().to_string();
        let var_lower = |name: &str| var(name).to_lowercase();
        let non_empty = |name: &str| Some(var(name)).filter(|v| !v.is_empty());

        let port = var("PORT").parse::<u16>().unwrap_or(DEFAULT_PORT);

        // Default to IPv6 unspecified (::) for dual-stack support.
        let host = var("HOST")
            .parse::<IpAddr>()
            .unwrap_or(IpAddr::V6(Ipv6Addr::UNSPECIFIED));

        let raw_api_key = non_empty("API_KEY");
        let api_key_placeholder = raw_api_key.as_deref() == Some(PLACEHOLDER_API_KEY);
        let api_key = raw_api_key.filter(|key| *key != PLACEHOLDER_API_KEY);

        let is_production = ["NODE_ENV", "APP_ENV", "RUST_ENV"]
            .iter()
            .any(|name| var_lower(name) == "production");
        let api_key_required = is_production || is_truthy(&var_lower("API_KEY_REQUIRED"));

        let body_limit_kb = var("BODY_LIMIT_KB")
            .parse::<usize>()
            .unwrap_or(DEFAULT_BODY_LIMIT_KB);

        let rate_limit_window_secs = var("RATE_LIMIT_WINDOW_SECS")
            .parse::<u64>()
            .unwrap_or(DEFAULT_RATE_LIMIT_WINDOW_SECS);
        let rate_limit_max_requests = var("RATE_LIMIT_MAX_REQUESTS")
            .parse::<u32>()
            .unwrap_or(DEFAULT_RATE_LIMIT_MAX_REQUESTS);

        Self {
            port,
            host,
            api_key,
            api_key_placeholder,
            api_key_required,
            body_limit_bytes: body_limit_kb.saturating_mul(1024),
            rate_limit_window_secs,
            rate_limit_max_requests,
            allowed_algs: non_empty("JWE_ALLOWED_ALGS"),
            allowed_encs: non_empty("JWE_ALLOWED_ENCS"),
        }
    }

    /// Create settings for tests: no API key, default limits.
    pub fn for_tests() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            api_key: None,
            api_key_placeholder: false,
            api_key_required: false,
            body_limit_bytes: DEFAULT_BODY_LIMIT_KB * 1024,
            rate_limit_window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
            rate_limit_max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            allowed_algs: None,
            allowed_encs: None,
        }
    }

    /// Same as [`Settings::for_tests`] with an API key configured.
    pub fn for_tests_with_api_key(key: &str) -> Self {
        Self {
            api_key: Some(key.to_string()),
            ..Self::for_tests()
        }
    }

    /// Validate settings.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key_required && self.api_key.is_none() {
            return Err("API_KEY is required in production. \
                 Set API_KEY or API_KEY_REQUIRED=0."
                .to_string());
        }
        if self.rate_limit_max_requests == 0 || self.rate_limit_window_secs == 0 {
            return Err(
                "RATE_LIMIT_WINDOW_SECS and RATE_LIMIT_MAX_REQUESTS must be positive".to_string(),
            );
        }

        let policy = self.algorithm_policy()?;
        if policy.algs().is_empty() || policy.encs().is_empty() {
            return Err("JWE_ALLOWED_ALGS and JWE_ALLOWED_ENCS must not be empty".to_string());
        }
        Ok(())
    }

    /// Algorithm allow-list; unset lists fall back to the defaults.
    pub fn algorithm_policy(&self) -> Result<AlgorithmPolicy, String> {
        let defaults = AlgorithmPolicy::default();
        let algs = match self.allowed_algs.as_deref() {
            Some(list) => AlgorithmPolicy::from_lists(list, "")?.algs().to_vec(),
            None => defaults.algs().to_vec(),
        };
        let encs = match self.allowed_encs.as_deref() {
            Some(list) => AlgorithmPolicy::from_lists("", list)?.encs().to_vec(),
            None => defaults.encs().to_vec(),
        };
        Ok(AlgorithmPolicy::new(algs, encs))
    }

    // Getters

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// True when `API_KEY` was left at the sample placeholder value.
    pub fn api_key_is_placeholder(&self) -> bool {
        self.api_key_placeholder
    }

    pub fn api_key_required(&self) -> bool {
        self.api_key_required
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_bytes
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn rate_limit_max_requests(&self) -> u32 {
        self.rate_limit_max_requests
    }
}
