//! HTTP test utilities for decrypt service integration tests.
//!
//! Provides a test app builder that mirrors the production app setup
//! while allowing configurable auth and limits.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;

use actix_web::test::TestRequest;
use serde_json::Value;

use jwe_decrypt_service::app::AppState;
use jwe_decrypt_service::config::Settings;

/// Peer address attached to every test request; the rate limiter keys on it.
pub const TEST_PEER: &str = "192.0.2.10:50000";

/// Builder for test apps with configurable settings.
#[derive(Default)]
pub struct TestAppBuilder {
    vars: HashMap<String, String>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one configuration variable as if it came from the environment.
    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_api_key(self, key: &str) -> Self {
        self.with_var("API_KEY", key)
    }

    pub fn settings(&self) -> Settings {
        Settings::from_lookup(|name| self.vars.get(name).cloned())
    }

    pub fn build(self) -> AppState {
        let settings = self.settings();
        settings.validate().expect("test settings are valid");
        AppState::from_settings(&settings).expect("test app state")
    }
}

/// App state without authentication and with default limits.
pub fn test_state() -> AppState {
    TestAppBuilder::new().build()
}

/// App state requiring `key` in `x-api-key`.
pub fn test_state_with_api_key(key: &str) -> AppState {
    TestAppBuilder::new().with_api_key(key).build()
}

pub fn peer() -> SocketAddr {
    TEST_PEER.parse().unwrap()
}

/// POST /decrypt with a JSON body.
pub fn decrypt_request(body: &Value) -> TestRequest {
    TestRequest::post()
        .uri("/decrypt")
        .peer_addr(peer())
        .set_json(body)
}

/// `{jwe, privateKeyJwk}` request for a JWK given as JSON text.
pub fn decrypt_body(jwe: &str, jwk: &str) -> Value {
    let jwk: Value = serde_json::from_str(jwk).unwrap();
    serde_json::json!({"jwe": jwe, "privateKeyJwk": jwk})
}

pub fn health_request() -> TestRequest {
    TestRequest::get().uri("/health").peer_addr(peer())
}
