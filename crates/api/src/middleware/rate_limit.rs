//! Per-client rate limiting for abuse-prone public endpoints.

use std::{convert::Infallible, net::SocketAddr, num::NonZeroU32, time::Duration};

use axum::{
    extract::{ConnectInfo, FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use governor::{DefaultKeyedRateLimiter, Quota};
use toronto_shared::AppError;

use crate::{AppState, error::ApiError};

/// Tracked keys before idle ones are released.
const RETAIN_THRESHOLD: usize = 10_000;

/// Keyed GCRA limiter allowing `max_requests` per window for each client key.
pub struct RateLimiter {
    inner: DefaultKeyedRateLimiter<String>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("tracked_keys", &self.inner.len())
            .finish()
    }
}

impl RateLimiter {
    /// Allows a burst of `max_requests`, refilled evenly over `window`.
    #[must_use]
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            inner: governor::RateLimiter::keyed(quota(window, max_requests)),
        }
    }

    /// Counts a request for `key`; returns false once the budget is spent.
    pub fn check(&self, key: &str) -> bool {
        if self.inner.len() > RETAIN_THRESHOLD {
            self.inner.retain_recent();
        }
        self.inner.check_key(&key.to_string()).is_ok()
    }
}

/// Zero budgets are raised to one request.
fn quota(window: Duration, max_requests: u32) -> Quota {
    let burst = NonZeroU32::new(max_requests).unwrap_or(NonZeroU32::MIN);
    Quota::with_period(window / burst.get())
        .unwrap_or_else(|| Quota::per_second(burst))
        .allow_burst(burst)
}

/// Client identity: first `X-Forwarded-For` hop, `X-Real-IP`, then the peer
/// address.
#[must_use]
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header("x-real-ip"))
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Client identity of the current request, as used for rate limiting.
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(Self(client_key(&parts.headers, peer)))
    }
}

/// Rejects clients over budget with 429 `rate_limited`.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_key(request.headers(), peer);
    let key = format!("{client} {}", request.uri().path());

    if !state.rate_limiter.check(&key) {
        tracing::warn!(client = %client, path = %request.uri().path(), "Rate limit exceeded");
        return Err(AppError::RateLimited.into());
    }
    Ok(next.run(request).await)
}
