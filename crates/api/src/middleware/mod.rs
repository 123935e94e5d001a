//! Middleware and request-scoped extractors.

pub mod auth;
pub mod locale;
pub mod rate_limit;

pub use auth::{AuthUser, auth_middleware, require_admin};
pub use locale::Locale;
pub use rate_limit::{ClientIp, RateLimiter, rate_limit};
