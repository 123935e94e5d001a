//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use toronto_shared::{AppError, Claims, TokenType};

use crate::{AppState, error::ApiError};

/// Cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Legacy camel-case spelling still sent by older clients.
pub const ACCESS_TOKEN_COOKIE_LEGACY: &str = "accessToken";
/// Cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Finds the access token: `access_token` cookie, `accessToken` cookie, then
/// `Authorization: Bearer`.
#[must_use]
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    [ACCESS_TOKEN_COOKIE, ACCESS_TOKEN_COOKIE_LEGACY]
        .into_iter()
        .filter_map(|name| jar.get(name))
        .map(|cookie| cookie.value().to_string())
        .find(|value| !value.is_empty())
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(extract_bearer_token)
                .map(str::to_string)
        })
}

/// Authentication middleware that validates access tokens.
///
/// Stores the [`Claims`] in request extensions for handlers and the admin
/// gate. Refresh tokens are rejected.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers()).ok_or_else(AppError::no_token)?;
    let claims = state.jwt_service.validate_as(&token, TokenType::Access)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Admin gate. Must run after [`auth_middleware`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or_else(AppError::no_token)?;

    if !claims.grants_admin() {
        tracing::info!(user_id = %claims.sub, "Admin route denied");
        return Err(AppError::admin_required().into());
    }
    Ok(next.run(request).await)
}

/// Extractor for authenticated user claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user ID from the claims.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.0.user_id()
    }

    /// Returns the inner claims.
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::no_token().into())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use rstest::rstest;

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[rstest]
    #[case(&[("cookie", "access_token=abc")], Some("abc"))]
    #[case(&[("cookie", "accessToken=legacy")], Some("legacy"))]
    #[case(&[("authorization", "Bearer xyz")], Some("xyz"))]
    #[case(&[("authorization", "bearer xyz")], Some("xyz"))]
    #[case(&[("authorization", "Basic Zm9v")], None)]
    #[case(&[("authorization", "Bearer ")], None)]
    #[case(&[], None)]
    fn finds_token(#[case] pairs: &[(&'static str, &'static str)], #[case] expected: Option<&str>) {
        assert_eq!(extract_token(&headers(pairs)).as_deref(), expected);
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let map = headers(&[
            ("cookie", "NEXT_LOCALE=en; access_token=from-cookie"),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(extract_token(&map).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn empty_cookie_falls_through_to_header() {
        let map = headers(&[("cookie", "access_token="), ("authorization", "Bearer h")]);
        assert_eq!(extract_token(&map).as_deref(), Some("h"));
    }
}
