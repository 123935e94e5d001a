//! Authentication routes for signup, token issue, refresh and logout.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};
use toronto_core::auth::{UserRole, hash_password, verify_dummy_password, verify_password};
use toronto_db::{
    RepositoryError, UserRepository, entities::users, repositories::CreateUserInput,
};
use toronto_shared::{AppError, TokenPair, TokenSubject, TokenType};
use tracing::info;
use validator::Validate;

use crate::{
    ApiSettings, AppState,
    error::{ApiError, ApiResult},
    extract::{OptionalValidatedJson, ValidatedJson},
    middleware::{
        AuthUser,
        auth::{ACCESS_TOKEN_COOKIE, ACCESS_TOKEN_COOKIE_LEGACY, REFRESH_TOKEN_COOKIE},
    },
};

/// Routes open to anyone (rate limited by the caller).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/token", post(token))
        .route("/auth/token/refresh", post(refresh))
}

/// Logout only clears cookies, so it needs neither auth nor rate limiting.
pub fn logout_routes() -> Router<AppState> {
    Router::new().route("/auth/logout", post(logout))
}

/// Routes that require an access token.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/user", get(current_user))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// Display name.
    #[validate(length(max = 200))]
    pub full_name: Option<String>,
}

/// Request body for `POST /auth/token`.
#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    /// Only `password` is supported.
    pub grant_type: Option<String>,
    /// Email address.
    #[validate(length(min = 1))]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for `POST /auth/token/refresh`. Falls back to the cookie.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: Option<String>,
}

/// The signed-in user as returned to clients.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Primary role.
    pub role: String,
    /// Every assigned role.
    pub roles: Vec<String>,
    /// Whether the user may use the admin console.
    pub is_admin: bool,
    /// Whether the email was verified.
    pub email_verified: bool,
    /// Last successful sign-in.
    pub last_sign_in_at: Option<chrono::NaiveDateTime>,
}

impl UserInfo {
    fn new(user: users::Model, roles: Vec<String>) -> Self {
        let role = UserRole::primary(&roles);
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: role.as_str().to_string(),
            is_admin: role.is_admin(),
            roles,
            email_verified: user.email_verified,
            last_sign_in_at: user.last_sign_in_at,
        }
    }
}

/// Token pair plus the user it was issued for.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Issued tokens.
    #[serde(flatten)]
    pub tokens: TokenPair,
    /// The authenticated user.
    pub user: UserInfo,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/signup - Register a user with the `user` role.
async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let user_repo = UserRepository::new(state.db.clone());

    let password_hash = hash_password(&payload.password)?;
    let user = user_repo
        .create(CreateUserInput {
            email: payload.email,
            password_hash,
            full_name: payload.full_name.filter(|n| !n.trim().is_empty()),
            roles: vec![UserRole::User],
        })
        .await?;
    info!(user_id = %user.id, "User signed up");

    let roles = vec![UserRole::User.as_str().to_string()];
    let (jar, body) = issue(&state, jar, user, roles)?;
    Ok((StatusCode::CREATED, jar, Json(body)))
}

/// POST /auth/token - Exchange credentials for a token pair.
async fn token(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<TokenRequest>,
) -> ApiResult<impl IntoResponse> {
    if let Some(grant) = payload.grant_type.as_deref()
        && grant != "password"
    {
        return Err(AppError::BadRequest(format!("Unsupported grant_type '{grant}'")).into());
    }

    let user_repo = UserRepository::new(state.db.clone());
    let Some(user) = user_repo.find_by_email(&payload.email).await? else {
        verify_dummy_password(&payload.password);
        info!("Sign-in attempt for unknown email");
        return Err(invalid_credentials().into());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Sign-in failed: wrong password");
        return Err(invalid_credentials().into());
    }
    if !user.is_active {
        return Err(account_disabled().into());
    }

    let roles = user_repo.roles_for(&user.id).await?;
    let user = user_repo.touch_sign_in(user).await?;
    info!(user_id = %user.id, "User signed in");

    let (jar, body) = issue(&state, jar, user, roles)?;
    Ok((jar, Json(body)))
}

/// POST /auth/token/refresh - Trade a refresh token for a new pair.
async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    OptionalValidatedJson(body): OptionalValidatedJson<RefreshRequest>,
) -> ApiResult<impl IntoResponse> {
    let payload = body.unwrap_or_default();
    let token = payload
        .refresh_token
        .filter(|t| !t.is_empty())
        .or_else(|| {
            jar.get(REFRESH_TOKEN_COOKIE)
                .map(|c| c.value().to_string())
                .filter(|t| !t.is_empty())
        })
        .ok_or_else(AppError::no_token)?;

    let claims = state.jwt_service.validate_as(&token, TokenType::Refresh)?;

    let user_repo = UserRepository::new(state.db.clone());
    let user = user_repo
        .find_by_id(claims.user_id())
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound(_) => ApiError(AppError::Unauthorized {
                code: "invalid_token",
                message: "Token subject no longer exists".to_string(),
            }),
            other => other.into(),
        })?;
    if !user.is_active {
        return Err(account_disabled().into());
    }

    let roles = user_repo.roles_for(&user.id).await?;
    let (jar, body) = issue(&state, jar, user, roles)?;
    Ok((jar, Json(body)))
}

/// GET /auth/user - The current user with fresh roles.
async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserInfo>> {
    let user_repo = UserRepository::new(state.db.clone());
    let user = user_repo.find_by_id(auth.user_id()).await?;
    let roles = user_repo.roles_for(&user.id).await?;
    Ok(Json(UserInfo::new(user, roles)))
}

/// POST /auth/logout - Clear auth cookies.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = [
        ACCESS_TOKEN_COOKIE,
        ACCESS_TOKEN_COOKIE_LEGACY,
        REFRESH_TOKEN_COOKIE,
    ]
    .into_iter()
    .fold(jar, |jar, name| {
        jar.remove(removal_cookie(name, &state.settings))
    });
    (StatusCode::NO_CONTENT, jar)
}

// ============================================================================
// Helpers
// ============================================================================

fn issue(
    state: &AppState,
    jar: CookieJar,
    user: users::Model,
    roles: Vec<String>,
) -> ApiResult<(CookieJar, AuthResponse)> {
    let role = UserRole::primary(&roles);
    let tokens = state.jwt_service.generate_pair(&TokenSubject {
        user_id: &user.id,
        email: &user.email,
        role: role.as_str(),
        roles: &roles,
    })?;

    let jar = jar
        .add(auth_cookie(
            ACCESS_TOKEN_COOKIE,
            tokens.access_token.clone(),
            &state.settings,
        ))
        .add(auth_cookie(
            REFRESH_TOKEN_COOKIE,
            tokens.refresh_token.clone(),
            &state.settings,
        ));

    Ok((
        jar,
        AuthResponse {
            tokens,
            user: UserInfo::new(user, roles),
        },
    ))
}

fn auth_cookie(name: &'static str, value: String, settings: &ApiSettings) -> Cookie<'static> {
    let mut builder = Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(settings.cookie_secure)
        .same_site(SameSite::Lax);
    if let Some(domain) = settings.cookie_domain.clone() {
        builder = builder.domain(domain);
    }
    builder.build()
}

fn removal_cookie(name: &'static str, settings: &ApiSettings) -> Cookie<'static> {
    let mut builder = Cookie::build(name).path("/");
    if let Some(domain) = settings.cookie_domain.clone() {
        builder = builder.domain(domain);
    }
    builder.build()
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized {
        code: "invalid_credentials",
        message: "Invalid email or password".to_string(),
    }
}

fn account_disabled() -> AppError {
    AppError::Forbidden {
        code: "account_disabled",
        message: "This account has been disabled".to_string(),
    }
}
