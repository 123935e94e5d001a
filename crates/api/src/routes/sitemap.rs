//! `sitemap.xml` for the public site.

use axum::{
    Router,
    extract::State,
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    routing::get,
};
use toronto_core::sitemap::SitemapBuilder;
use toronto_db::{ProjectRepository, ServiceRepository};

use crate::{AppState, error::ApiResult};

/// Sitemap route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/sitemap.xml", get(sitemap))
}

/// GET /sitemap.xml - Static pages plus every active project and service,
/// once per supported locale.
async fn sitemap(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let projects = ProjectRepository::new(state.db.clone())
        .active_slugs()
        .await?;
    let services = ServiceRepository::new(state.db.clone())
        .active_slugs()
        .await?;

    let mut builder =
        SitemapBuilder::new(&state.settings.public_url, state.locales.supported()).with_static_pages();
    for (slug, updated_at) in &projects {
        builder.add(&format!("/projects/{slug}"), Some(*updated_at));
    }
    for (slug, updated_at) in &services {
        builder.add(&format!("/services/{slug}"), Some(*updated_at));
    }
    tracing::debug!(urls = builder.len(), "Rendered sitemap");

    Ok(([(CONTENT_TYPE, "application/xml; charset=utf-8")], builder.render()))
}
