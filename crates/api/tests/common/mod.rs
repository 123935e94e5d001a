//! Shared helpers for router tests backed by SeaORM's mock database.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::Value;
use toronto_api::{AppState, create_router};
use toronto_shared::{
    TokenSubject,
    config::{
        AppConfig, AuthConfig, DatabaseConfig, JwtSettings, LocaleConfig, RateLimitConfig,
        ServerConfig, SiteConfig,
    },
};
use tower::ServiceExt;

/// Configuration with test-only secrets and the default locales.
pub fn test_config(max_requests: u32) -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "mysql://mock".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        jwt: JwtSettings {
            secret: "test-secret-key-that-is-long-enough".to_string(),
            access_token_expiry_secs: 900,
            refresh_token_expiry_secs: 86_400,
        },
        auth: AuthConfig::default(),
        locale: LocaleConfig::default(),
        site: SiteConfig {
            public_url: "https://example.com".to_string(),
        },
        rate_limit: RateLimitConfig {
            window_secs: 60,
            max_requests,
        },
    }
}

/// State over the given connection.
pub fn test_state(db: DatabaseConnection) -> AppState {
    AppState::new(db, &test_config(100))
}

/// State over an empty mock connection.
pub fn empty_state() -> AppState {
    test_state(MockDatabase::new(DatabaseBackend::MySql).into_connection())
}

/// Full router, middleware included.
pub fn app(state: AppState) -> Router {
    create_router(state)
}

/// Access token for a user holding `roles`.
pub fn access_token(state: &AppState, roles: &[&str]) -> String {
    let roles: Vec<String> = roles.iter().map(ToString::to_string).collect();
    let role = roles.first().cloned().unwrap_or_else(|| "user".to_string());
    state
        .jwt_service
        .generate_access_token(&TokenSubject {
            user_id: "11111111-1111-4111-8111-111111111111",
            email: "someone@example.com",
            role: &role,
            roles: &roles,
        })
        .unwrap()
}

/// Refresh token for a plain user.
pub fn refresh_token(state: &AppState) -> String {
    let roles = vec!["user".to_string()];
    state
        .jwt_service
        .generate_refresh_token(&TokenSubject {
            user_id: "11111111-1111-4111-8111-111111111111",
            email: "someone@example.com",
            role: "user",
            roles: &roles,
        })
        .unwrap()
}

/// Sends a GET with an optional bearer token.
pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Sends a JSON body with an optional bearer token.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: &str,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Collects the body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collects the body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Asserts the error envelope code.
pub async fn assert_error_code(response: Response<Body>, status: u16, code: &str) {
    assert_eq!(response.status().as_u16(), status);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], code, "unexpected envelope: {json}");
    assert!(json["error"]["message"].is_string());
}
