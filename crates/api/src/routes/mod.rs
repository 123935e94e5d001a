//! API route definitions.

use axum::{Router, middleware};

use crate::{
    AppState,
    middleware::{auth_middleware, rate_limit, require_admin},
};

pub mod auth;
pub mod contacts;
pub mod faqs;
pub mod health;
mod helpers;
pub mod profiles;
pub mod projects;
pub mod references;
pub mod services;
pub mod site_settings;
pub mod sitemap;
pub mod storage;
pub mod user_roles;

/// Creates the API router, layering middleware that needs the state.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Public reads
    let public_routes = Router::new()
        .merge(health::routes())
        .merge(sitemap::routes())
        .merge(projects::routes())
        .merge(services::routes())
        .merge(faqs::routes())
        .merge(references::routes())
        .merge(site_settings::routes())
        .merge(auth::logout_routes());

    // Abuse-prone writes
    let limited_routes = Router::new()
        .merge(auth::routes())
        .merge(contacts::submit_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    // Signed-in user
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(profiles::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Admin console; layers run bottom-up, so auth runs before the admin gate.
    // Route layers leave unknown admin paths to the 404 fallback.
    let admin_routes = Router::new()
        .merge(projects::admin_routes())
        .merge(services::admin_routes())
        .merge(faqs::admin_routes())
        .merge(references::admin_routes())
        .merge(site_settings::admin_routes())
        .merge(contacts::admin_routes())
        .merge(user_roles::admin_routes())
        .merge(storage::admin_routes())
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(limited_routes)
        .merge(protected_routes)
        .nest("/admin", admin_routes)
}
