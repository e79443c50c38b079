//! Decryption service shared by the HTTP handlers.
//!
//! Holds the algorithm allow-list resolved from [`Settings`] at startup. The
//! service itself is immutable; every call runs the full pipeline on its own
//! stack and keeps nothing afterwards.

use std::sync::Arc;

use serde_json::Value;

use crate::config::Settings;
use crate::error::JweResult;
use crate::jwe::{self, AlgorithmPolicy};

/// Stateless JWE decryption service.
#[derive(Debug, Clone)]
pub struct Decryptor {
    policy: Arc<AlgorithmPolicy>,
}

impl Decryptor {
    pub fn new(policy: AlgorithmPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    /// Build from validated service settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, String> {
        settings.algorithm_policy().map(Self::new)
    }

    pub fn policy(&self) -> &AlgorithmPolicy {
        &self.policy
    }

    /// Decrypt a compact JWE with the caller's private JWK.
    ///
    /// Returns the parsed plaintext. CPU bound; call from a blocking
    /// context when running inside the server.
    pub fn decrypt(&self, jwe: &str, jwk: &Value) -> JweResult<Value> {
        match jwe::decrypt_compact(jwe, jwk, &self.policy) {
            Ok(decrypted) => {
                tracing::info!(
                    alg = %decrypted.header.alg,
                    enc = %decrypted.header.enc,
                    kid = decrypted.header.kid.as_deref().unwrap_or("-"),
                    compressed = decrypted.header.zip.is_some(),
                    "JWE decrypted"
                );
                Ok(decrypted.payload)
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind(), jwe_len = jwe.len(), "JWE decryption failed");
                Err(e)
            }
        }
    }
}

impl Default for Decryptor {
    fn default() -> Self {
        Self::new(AlgorithmPolicy::default())
    }
}
