use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{security_headers_middleware, trace_id};
use crate::routes::{check_in, health, registrations};
use crate::services::{CheckInService, EmailService, RegistrationService, SmsService};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub email: EmailService,
    pub sms: SmsService,
}

impl AppState {
    /// Build a registration service bound to this state.
    pub fn registration_service(&self) -> RegistrationService {
        RegistrationService::new(
            self.pool.clone(),
            self.email.clone(),
            self.sms.clone(),
            self.config.server.app_base_url.clone(),
        )
    }

    /// Build a check-in service bound to this state.
    pub fn check_in_service(&self) -> CheckInService {
        CheckInService::new(self.pool.clone())
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        email: EmailService::new(config.email.clone()),
        sms: SmsService::new(config.sms.clone()),
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Registration and check-in routes (v1)
    let api_routes = Router::new()
        .route(
            "/api/v1/events/:event_id/registrations",
            post(registrations::register).get(registrations::list_registrations),
        )
        .route(
            "/api/v1/events/:event_id/check-in",
            post(check_in::check_in),
        )
        .route(
            "/api/v1/events/:event_id/check-in/stats",
            get(check_in::check_in_stats),
        )
        .route(
            "/api/v1/registrations/:token",
            get(registrations::get_registration_by_token),
        );

    // Public health routes
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
