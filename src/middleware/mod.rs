//! Middleware for the decryption service.
//!
//! Provides cross-cutting concerns like authentication and rate limiting
//! that apply across routes.

pub mod auth;
pub mod headers;
pub mod rate_limit;

pub use auth::ApiKeyAuth;
pub use headers::{cors, security_headers};
pub use rate_limit::{RateLimitConfig, RateLimitState, RateLimiter, limiter};
