//! JWE Decrypt Service
//!
//! Decrypts JWE compact serializations with a caller-supplied private JWK.
//!
//! ## Endpoints
//!
//! - `GET /health`: liveness, public
//! - `POST /decrypt`: `{jwe, privateKeyJwk}` → `{decryptedMessages, success}`
//!
//! ## Security
//!
//! - `x-api-key` checked against `API_KEY` (skipped with a warning when unset)
//! - Per-IP rate limit and JSON body cap
//! - Private keys and plaintext are never logged

use actix_web::HttpServer;
use jwe_decrypt_service::{
    app::{AppState, build_app},
    config::Settings,
    telemetry,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing first
    telemetry::init_tracing();

    // Load and validate settings
    let settings = Settings::from_env();

    if let Err(message) = settings.validate() {
        tracing::error!("{message}");
        std::process::exit(1);
    }

    if settings.api_key_is_placeholder() {
        tracing::warn!(
            "API_KEY is set to the sample placeholder and is ignored. \
             Set a real secret for production."
        );
    }
    if settings.api_key().is_none() {
        tracing::warn!(
            "API key check DISABLED for /decrypt. \
             Set API_KEY (and API_KEY_REQUIRED=1) for production."
        );
    }

    let state = match AppState::from_settings(&settings) {
        Ok(state) => state,
        Err(message) => {
            tracing::error!("{message}");
            std::process::exit(1);
        }
    };

    let addr = settings.socket_addr();

    tracing::info!(
        addr = %addr,
        api_key = settings.api_key().is_some(),
        body_limit_bytes = settings.body_limit_bytes(),
        rate_limit_window_secs = settings.rate_limit_window().as_secs(),
        rate_limit_max_requests = settings.rate_limit_max_requests(),
        algs = ?state.decryptor().policy().algs(),
        encs = ?state.decryptor().policy().encs(),
        "Starting JWE decrypt service"
    );

    HttpServer::new(move || build_app(&state))
        .bind(addr)?
        .run()
        .await?;

    telemetry::shutdown_tracing();
    Ok(())
}
