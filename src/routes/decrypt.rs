//! Decryption endpoint.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decryptor::Decryptor;
use crate::error::ApiError;
use crate::jwe::matches_compact_pattern;
use crate::jwe::payload::{extract_messages, is_truthy};

/// Validated `/decrypt` request.
#[derive(Debug)]
pub struct DecryptRequest {
    pub jwe: String,
    pub private_key_jwk: Value,
}

impl DecryptRequest {
    /// Pull `jwe` and `privateKeyJwk` out of the request body.
    ///
    /// Absent or falsy fields count as missing. The JWK is passed through
    /// untouched; its shape is checked by the key importer.
    pub fn from_body(mut body: Value) -> Result<Self, ApiError> {
        let jwe = body
            .get_mut("jwe")
            .map(Value::take)
            .filter(is_truthy)
            .ok_or(ApiError::MissingJwe)?;
        let private_key_jwk = body
            .get_mut("privateKeyJwk")
            .map(Value::take)
            .filter(is_truthy)
            .ok_or(ApiError::MissingJwk)?;

        let jwe = match jwe {
            Value::String(jwe) if matches_compact_pattern(&jwe) => jwe,
            _ => return Err(ApiError::InvalidFormat),
        };

        Ok(Self {
            jwe,
            private_key_jwk,
        })
    }
}

/// Successful decryption response.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecryptResponse {
    pub decrypted_messages: Value,
    pub success: bool,
}

async fn run(decryptor: web::Data<Decryptor>, body: Value) -> Result<DecryptResponse, ApiError> {
    let request = DecryptRequest::from_body(body)?;
    tracing::debug!(jwe_len = request.jwe.len(), "Decrypt request accepted");

    let payload = web::block(move || {
        decryptor.decrypt(&request.jwe, &request.private_key_jwk)
    })
    .await??;

    Ok(DecryptResponse {
        decrypted_messages: extract_messages(payload),
        success: true,
    })
}

/// POST /decrypt
///
/// Decrypt a compact JWE with the supplied private JWK.
#[tracing::instrument(skip(decryptor, body))]
pub async fn decrypt(decryptor: web::Data<Decryptor>, body: web::Json<Value>) -> HttpResponse {
    match run(decryptor, body.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                tracing::error!(error = %e, kind = ?e.kind(), "Decrypt request failed");
            } else {
                tracing::warn!(error = %e, kind = ?e.kind(), "Decrypt request rejected");
            }
            e.error_response()
        }
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let api_error = match &err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            ApiError::BodyTooLarge
        }
        other => ApiError::InvalidBody(other.to_string()),
    };
    tracing::warn!(error = %err, "Rejected request body");
    InternalError::from_response(err, api_error.error_response()).into()
}

/// JSON extractor config with the body size cap and JSON error bodies.
pub fn json_config(limit_bytes: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit_bytes)
        .error_handler(json_error)
}

/// Configure decryption routes on the given scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/decrypt", web::post().to(decrypt));
}
