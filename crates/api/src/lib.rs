//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for public content, auth and the admin console
//! - Authentication, admin, locale and rate-limit middleware
//! - Request extractors and the JSON error envelope

pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use sea_orm::DatabaseConnection;
use toronto_core::locale::LocaleSettings;
use toronto_shared::{AppConfig, JwtConfig, JwtService};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::RateLimiter;

/// Settings handlers read per request.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Running in production (hides internal error details).
    pub production: bool,
    /// Marks auth cookies `Secure`.
    pub cookie_secure: bool,
    /// Optional auth cookie domain.
    pub cookie_domain: Option<String>,
    /// Public site URL used for sitemap entries.
    pub public_url: String,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl ApiSettings {
    /// Extracts the API-facing settings from the app configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            production: config.server.is_production(),
            cookie_secure: config.auth.cookie_secure,
            cookie_domain: config.auth.cookie_domain.clone(),
            public_url: config.site.public_url.clone(),
            cors_origins: config.server.cors_origins.clone(),
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Supported locales and default.
    pub locales: Arc<LocaleSettings>,
    /// Limiter for contact and auth endpoints.
    pub rate_limiter: Arc<RateLimiter>,
    /// Per-request settings.
    pub settings: Arc<ApiSettings>,
}

impl AppState {
    /// Builds the state from a connection and loaded configuration.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Self {
        Self {
            db: Arc::new(db),
            jwt_service: Arc::new(JwtService::new(JwtConfig::from(&config.jwt))),
            locales: Arc::new(LocaleSettings::new(
                config.locale.supported.iter().map(String::as_str),
                &config.locale.default,
            )),
            rate_limiter: Arc::new(RateLimiter::new(
                Duration::from_secs(config.rate_limit.window_secs),
                config.rate_limit.max_requests,
            )),
            settings: Arc::new(ApiSettings::from_config(config)),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    error::expose_internal_details(!state.settings.production);

    Router::new()
        .merge(routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.settings.cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if parsed.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT_LANGUAGE,
            header::HeaderName::from_static("x-locale"),
        ])
        .allow_credentials(true)
}
