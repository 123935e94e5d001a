//! Router tests over a mock database.

mod common;

use chrono::{NaiveDate, NaiveDateTime};
use common::{
    access_token, app, assert_error_code, body_json, body_text, empty_state, get, refresh_token,
    send_json, test_config, test_state,
};
use rstest::rstest;
use sea_orm::{DatabaseBackend, MockDatabase};
use toronto_api::AppState;
use toronto_db::entities::{projects, projects_i18n, services, users};

fn ts() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn project(id: &str, slug: &str) -> projects::Model {
    projects::Model {
        id: id.to_string(),
        slug: slug.to_string(),
        category: Some("villa".to_string()),
        client_name: None,
        location: Some("Antalya".to_string()),
        project_year: Some(2023),
        cover_image_url: None,
        gallery: None,
        is_featured: true,
        is_active: true,
        display_order: 1,
        created_at: ts(),
        updated_at: ts(),
    }
}

fn project_translation(project_id: &str, locale: &str, title: &str) -> projects_i18n::Model {
    projects_i18n::Model {
        id: format!("{project_id}-{locale}"),
        project_id: project_id.to_string(),
        locale: locale.to_string(),
        title: title.to_string(),
        summary: None,
        content: None,
        meta_title: None,
        meta_description: None,
        created_at: ts(),
        updated_at: ts(),
    }
}

fn service(id: &str, slug: &str) -> services::Model {
    services::Model {
        id: id.to_string(),
        slug: slug.to_string(),
        icon: None,
        image_url: None,
        is_featured: false,
        is_active: true,
        display_order: 0,
        created_at: ts(),
        updated_at: ts(),
    }
}

#[tokio::test]
async fn health_reports_version() {
    let response = get(app(empty_state()), "/health", None).await;
    assert_eq!(response.status(), 200);
    let json = body_json(response).await;
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = get(app(empty_state()), "/nope", None).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn unknown_admin_path_is_404_not_an_auth_error() {
    let response = get(app(empty_state()), "/admin/nope", None).await;
    assert_eq!(response.status(), 404);

    let state = empty_state();
    let token = access_token(&state, &["user"]);
    let response = get(app(state), "/admin/nope", Some(&token)).await;
    assert_eq!(response.status(), 404);
}

// ============================================================================
// Auth gates
// ============================================================================

#[rstest]
#[case("/auth/user")]
#[case("/profiles/me")]
#[case("/admin/projects")]
#[case("/admin/contacts")]
#[tokio::test]
async fn protected_routes_require_a_token(#[case] uri: &str) {
    let response = get(app(empty_state()), uri, None).await;
    assert_error_code(response, 401, "no_token").await;
}

#[rstest]
#[case("/admin/projects")]
#[case("/admin/site_settings")]
#[case("/admin/user_roles")]
#[case("/admin/storage/assets")]
#[tokio::test]
async fn admin_routes_reject_plain_users(#[case] uri: &str) {
    let state = empty_state();
    let token = access_token(&state, &["user"]);
    let response = get(app(state), uri, Some(&token)).await;
    assert_error_code(response, 403, "admin_required").await;
}

#[tokio::test]
async fn refresh_token_is_not_an_access_token() {
    let state = empty_state();
    let token = refresh_token(&state);
    let response = get(app(state), "/auth/user", Some(&token)).await;
    assert_error_code(response, 401, "invalid_token").await;
}

#[tokio::test]
async fn garbage_token_is_invalid() {
    let response = get(app(empty_state()), "/auth/user", Some("not.a.jwt")).await;
    assert_error_code(response, 401, "invalid_token").await;
}

#[tokio::test]
async fn access_token_cookie_is_accepted() {
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([vec![project("p1", "villa-one")]])
        .append_query_results([Vec::<projects_i18n::Model>::new()])
        .into_connection();
    let state = test_state(db);
    let token = access_token(&state, &["admin"]);

    let request = axum::http::Request::builder()
        .uri("/admin/projects")
        .header("cookie", format!("access_token={token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app(state), request).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn refresh_with_malformed_json_uses_the_error_envelope() {
    let response = send_json(app(empty_state()), "POST", "/auth/token/refresh", "{oops", None).await;
    assert_error_code(response, 400, "invalid_body").await;
}

#[tokio::test]
async fn sign_in_with_unknown_email_is_invalid_credentials() {
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([Vec::<users::Model>::new()])
        .into_connection();
    let body = r#"{"email":"nobody@example.com","password":"whatever-pass"}"#;
    let response = send_json(app(test_state(db)), "POST", "/auth/token", body, None).await;
    assert_error_code(response, 401, "invalid_credentials").await;
}

#[tokio::test]
async fn refresh_without_token_is_rejected() {
    let response = send_json(app(empty_state()), "POST", "/auth/token/refresh", "{}", None).await;
    assert_error_code(response, 401, "no_token").await;
}

// ============================================================================
// Public content
// ============================================================================

#[tokio::test]
async fn project_list_honours_select_projection() {
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([vec![project("p1", "villa-one"), project("p2", "office-two")]])
        .append_query_results([vec![
            project_translation("p1", "tr", "Villa Bir"),
            project_translation("p2", "en", "Office Two"),
        ]])
        .into_connection();

    let response = get(app(test_state(db)), "/projects?select=slug", None).await;
    assert_eq!(response.status(), 200);
    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!([{ "slug": "villa-one" }, { "slug": "office-two" }])
    );
}

#[tokio::test]
async fn project_list_picks_translation_along_fallback_chain() {
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([vec![project("p1", "villa-one")]])
        .append_query_results([vec![
            project_translation("p1", "tr", "Villa Bir"),
            project_translation("p1", "en", "Villa One"),
        ]])
        .into_connection();

    let request = axum::http::Request::builder()
        .uri("/projects")
        .header("x-locale", "en")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app(test_state(db)), request)
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json[0]["title"], "Villa One");
    assert_eq!(json[0]["locale"], "en");
    assert_eq!(json[0]["slug"], "villa-one");
}

#[tokio::test]
async fn missing_project_is_404() {
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([Vec::<projects::Model>::new()])
        .into_connection();
    let response = get(app(test_state(db)), "/projects/does-not-exist", None).await;
    assert_error_code(response, 404, "not_found").await;
}

#[tokio::test]
async fn sitemap_lists_static_pages_and_slugs_per_locale() {
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([vec![project("p1", "villa-one")]])
        .append_query_results([vec![service("s1", "interior-design")]])
        .into_connection();

    let response = get(app(test_state(db)), "/sitemap.xml", None).await;
    assert_eq!(response.status(), 200);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/xml")
    );
    let xml = body_text(response).await;
    assert!(xml.contains("<loc>https://example.com/tr/projects/villa-one</loc>"));
    assert!(xml.contains("<loc>https://example.com/en/services/interior-design</loc>"));
    assert!(xml.contains("<loc>https://example.com/de/contact</loc>"));
}

// ============================================================================
// Admin writes
// ============================================================================

#[tokio::test]
async fn duplicate_project_slug_is_conflict() {
    // The slug pre-check finds an existing row.
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([vec![project("p1", "villa-one")]])
        .into_connection();
    let state = test_state(db);
    let token = access_token(&state, &["admin"]);

    let body = r#"{"slug":"villa-one","translations":[{"locale":"tr","title":"Villa"}]}"#;
    let response = send_json(app(state), "POST", "/admin/projects", body, Some(&token)).await;
    assert_error_code(response, 409, "conflict").await;
}

#[tokio::test]
async fn malformed_json_is_invalid_body() {
    let state = empty_state();
    let token = access_token(&state, &["admin"]);
    let response = send_json(app(state), "POST", "/admin/projects", "{oops", Some(&token)).await;
    assert_error_code(response, 400, "invalid_body").await;
}

#[tokio::test]
async fn project_without_translations_fails_validation() {
    let state = empty_state();
    let token = access_token(&state, &["admin"]);
    let body = r#"{"slug":"villa-one","translations":[]}"#;
    let response = send_json(app(state), "POST", "/admin/projects", body, Some(&token)).await;
    assert_eq!(response.status(), 422);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(json["error"]["details"]["translations"].is_array());
}

#[tokio::test]
async fn unsupported_translation_locale_is_rejected() {
    let state = empty_state();
    let token = access_token(&state, &["admin"]);
    let body = r#"{"translations":[{"locale":"fr","title":"Villa"}]}"#;
    let response = send_json(app(state), "POST", "/admin/projects", body, Some(&token)).await;
    assert_eq!(response.status(), 422);
    let json = body_json(response).await;
    assert!(json["error"]["details"]["locale"].is_array());
}

#[tokio::test]
async fn blank_setting_key_is_rejected() {
    let state = empty_state();
    let token = access_token(&state, &["admin"]);
    let body = r#"{"key":"   ","value":"Toronto"}"#;
    let response = send_json(app(state), "POST", "/admin/site_settings", body, Some(&token)).await;
    assert_eq!(response.status(), 422);
    let json = body_json(response).await;
    assert_eq!(json["error"]["details"]["key"][0]["code"], "blank_key");
}

#[tokio::test]
async fn invalid_role_name_is_rejected() {
    let state = empty_state();
    let token = access_token(&state, &["admin"]);
    let body = r#"{"user_id":"11111111-1111-4111-8111-111111111111","role":"owner"}"#;
    let response = send_json(app(state), "POST", "/admin/user_roles", body, Some(&token)).await;
    assert_error_code(response, 422, "validation_error").await;
}

#[tokio::test]
async fn signup_validates_email_and_password() {
    let body = r#"{"email":"not-an-email","password":"short"}"#;
    let response = send_json(app(empty_state()), "POST", "/auth/signup", body, None).await;
    assert_eq!(response.status(), 422);
    let json = body_json(response).await;
    assert!(json["error"]["details"]["email"].is_array());
    assert!(json["error"]["details"]["password"].is_array());
}

// ============================================================================
// Rate limiting
// ============================================================================

#[tokio::test]
async fn contact_submissions_are_rate_limited() {
    let db = MockDatabase::new(DatabaseBackend::MySql).into_connection();
    let state = AppState::new(db, &test_config(1));
    let router = app(state);

    // Fails validation, but still spends the budget.
    let body = r#"{"name":"A","email":"not-an-email","message":"hi"}"#;
    let first = send_json(router.clone(), "POST", "/contacts", body, None).await;
    assert_eq!(first.status(), 422);

    let second = send_json(router, "POST", "/contacts", body, None).await;
    assert_error_code(second, 429, "rate_limited").await;
}

#[tokio::test]
async fn public_reads_are_not_rate_limited() {
    let state = AppState::new(
        MockDatabase::new(DatabaseBackend::MySql).into_connection(),
        &test_config(1),
    );
    let router = app(state);
    for _ in 0..3 {
        let response = get(router.clone(), "/health", None).await;
        assert_eq!(response.status(), 200);
    }
}
