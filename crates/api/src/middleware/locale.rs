//! Request locale extractor.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};
use axum_extra::extract::CookieJar;
use toronto_core::locale::{LocaleHints, ResolvedLocale};

use crate::AppState;

/// Header naming the locale explicitly.
pub const LOCALE_HEADER: &str = "x-locale";
/// Cookie the frontend stores the chosen locale in.
pub const LOCALE_COOKIE: &str = "NEXT_LOCALE";

/// The locale a request resolved to, with its fallback chain.
#[derive(Debug, Clone)]
pub struct Locale(pub ResolvedLocale);

impl Locale {
    /// Resolved locale code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0.locale
    }

    /// Locales to try when picking translations.
    #[must_use]
    pub fn chain(&self) -> &[String] {
        &self.0.fallbacks
    }
}

impl FromRequestParts<AppState> for Locale {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let resolved = state.locales.resolve(LocaleHints {
            x_locale: header(parts, LOCALE_HEADER),
            cookie: jar.get(LOCALE_COOKIE).map(|c| c.value()),
            accept_language: header(parts, ACCEPT_LANGUAGE.as_str()),
        });
        tracing::trace!(locale = %resolved.locale, source = ?resolved.source, "Resolved request locale");
        Ok(Self(resolved))
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}
