// Crate-level lint configuration
// Allow noisy pedantic/cargo lints that aren't worth fixing individually
#![allow(clippy::multiple_crate_versions)] // Transitive deps, can't easily fix
#![allow(clippy::missing_errors_doc)] // Would require extensive doc changes
#![allow(clippy::missing_panics_doc)] // Would require extensive doc changes
#![allow(clippy::must_use_candidate)] // Too many false positives for internal APIs
#![allow(clippy::module_name_repetitions)] // Acceptable for clarity (e.g., JweError in error mod)
#![allow(clippy::doc_markdown)] // Too strict about backticks in docs
#![allow(clippy::missing_const_for_fn)] // Often debatable, runtime doesn't benefit

//! JWE Decrypt Service
//!
//! An HTTP service that decrypts JSON Web Encryption (RFC 7516) compact
//! serializations with a private JWK supplied by the caller and returns the
//! JSON payload.
//!
//! ## Architecture
//!
//! - **Pipeline** ([`jwe`]): parse, validate header, import key, recover the
//!   CEK, decrypt and verify, parse payload. Pure and stateless.
//! - **Service** ([`Decryptor`]): the pipeline plus the algorithm allow-list
//!   fixed at startup.
//! - **HTTP** ([`routes`], [`middleware`]): `/health` and `/decrypt`, API key
//!   gate, per-IP rate limit, security headers.
//!
//! ## Security Model
//!
//! - **Allow-list first**: `alg`/`enc` are checked before any key is imported
//! - **No oracle**: unwrap, tag, MAC and padding failures share one error
//! - **No retention**: keys and CEKs are zeroized when the request ends
//! - **No secrets in logs**: only algorithm names, key ids and lengths are logged

pub mod app;
pub mod config;
pub mod decryptor;
pub mod error;
pub mod jwe;
pub mod middleware;
pub mod routes;

#[doc(hidden)]
pub mod test_support;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "jwe_decrypt_service=info,actix_web=info";

/// `LOG_FORMAT=json` selects JSON log lines.
fn json_logs_requested() -> bool {
    std::env::var("LOG_FORMAT").is_ok_and(|v| v.trim().eq_ignore_ascii_case("json"))
}

#[cfg(feature = "otel")]
pub mod telemetry;

#[cfg(not(feature = "otel"))]
pub mod telemetry {
    //! Stub telemetry module when OpenTelemetry is disabled.

    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    /// Initialize tracing with console output only.
    pub fn init_tracing() {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| super::DEFAULT_LOG_FILTER.into());
        let registry = tracing_subscriber::registry().with(env_filter);

        if super::json_logs_requested() {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
        } else {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    /// No-op shutdown when OpenTelemetry is disabled.
    pub fn shutdown_tracing() {}
}

// Re-export commonly used types
pub use config::Settings;
pub use decryptor::Decryptor;
pub use error::{ApiError, ErrorKind, JweError};
