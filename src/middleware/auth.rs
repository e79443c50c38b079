//! API key middleware for the decryption endpoint.
//!
//! Compares the `x-api-key` header against `API_KEY`. When no key is
//! configured the check is skipped with a warning so the service stays usable
//! in local development. Only `/decrypt` is gated; `/health` and unknown
//! paths pass through untouched.

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{Error, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use subtle::ConstantTimeEq;

use crate::config::Settings;
use crate::error::ApiError;

const API_KEY_HEADER: &str = "x-api-key";

/// Middleware enforcing the shared API key.
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: Option<String>,
}

impl ApiKeyAuth {
    /// Build from service settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            api_key: settings.api_key().map(ToString::to_string),
        }
    }

    /// Build directly from config (used for tests).
    pub fn from_config(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    fn is_protected_path(path: &str) -> bool {
        matches!(path, "/decrypt")
    }

    fn extract_key(req: &ServiceRequest) -> Option<&str> {
        req.headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
    }
}

/// Constant-time key comparison. Slices of different length never match.
fn keys_match(provided: &[u8], expected: &[u8]) -> bool {
    provided.ct_eq(expected).into()
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service,
            api_key: self.api_key.clone(),
        }))
    }
}

pub struct ApiKeyAuthMiddleware<S> {
    service: S,
    api_key: Option<String>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if ApiKeyAuth::is_protected_path(req.path()) {
            match self.api_key.as_deref() {
                Some(expected) => {
                    let authorized = ApiKeyAuth::extract_key(&req)
                        .is_some_and(|provided| keys_match(provided.as_bytes(), expected.as_bytes()));

                    if !authorized {
                        tracing::warn!(
                            path = %req.path(),
                            peer = ?req.peer_addr(),
                            "Rejected request with invalid or missing API key"
                        );
                        let (req, _pl) = req.into_parts();
                        let response = ApiError::Unauthorized.error_response();
                        return Box::pin(async move {
                            Ok(ServiceResponse::new(req, response.map_into_right_body()))
                        });
                    }
                }
                None => {
                    tracing::warn!(
                        path = %req.path(),
                        "API_KEY not configured, skipping API key check"
                    );
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
