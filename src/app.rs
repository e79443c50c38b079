//! Application assembly shared by the binary and the HTTP tests.

use actix_governor::Governor;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};
use tracing_actix_web::TracingLogger;

use crate::config::Settings;
use crate::decryptor::Decryptor;
use crate::middleware::{self, ApiKeyAuth, RateLimitConfig, RateLimitState};
use crate::routes;

/// Everything the app factory needs, built once and cloned into each worker.
///
/// The governor config holds the per-IP buckets, so cloning it keeps a single
/// rate limit across workers.
#[derive(Clone)]
pub struct AppState {
    decryptor: web::Data<Decryptor>,
    auth: ApiKeyAuth,
    governor: RateLimitState,
    body_limit_bytes: usize,
}

impl AppState {
    /// Build from validated settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, String> {
        let decryptor = Decryptor::from_settings(settings)?;
        Ok(Self {
            decryptor: web::Data::new(decryptor),
            auth: ApiKeyAuth::new(settings),
            governor: middleware::rate_limit::governor_config(&RateLimitConfig::from_settings(
                settings,
            )),
            body_limit_bytes: settings.body_limit_bytes(),
        })
    }

    pub fn decryptor(&self) -> &Decryptor {
        &self.decryptor
    }
}

/// Build the application with the production middleware stack.
///
/// The limiter sits inside the API key check because its header-reporting
/// variant needs an `Unpin` inner future, so it wraps the router directly.
/// Requests rejected with 401 never consume a rate limit token.
pub fn build_app(
    state: &AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        // Innermost first: the last wrap runs first on a request
        .wrap(Governor::new(&state.governor))
        .wrap(state.auth.clone())
        .wrap(middleware::cors())
        .wrap(middleware::security_headers())
        // Request tracing
        .wrap(TracingLogger::default())
        // Shared state
        .app_data(state.decryptor.clone())
        .app_data(routes::decrypt::json_config(state.body_limit_bytes))
        // Routes
        .configure(routes::health::configure)
        .configure(routes::decrypt::configure)
}
