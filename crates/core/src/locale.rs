//! Locale resolution.
//!
//! Picks the response locale from request hints and builds the fallback
//! chain used when a translation is missing.

use serde::Serialize;

/// Where a resolved locale came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleSource {
    /// `X-Locale` header.
    Header,
    /// `NEXT_LOCALE` cookie.
    Cookie,
    /// `Accept-Language` header.
    AcceptLanguage,
    /// Configured default.
    Default,
}

/// Raw locale hints taken from a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleHints<'a> {
    /// `X-Locale` header value.
    pub x_locale: Option<&'a str>,
    /// `NEXT_LOCALE` cookie value.
    pub cookie: Option<&'a str>,
    /// `Accept-Language` header value.
    pub accept_language: Option<&'a str>,
}

/// Outcome of locale resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocale {
    /// Chosen locale code.
    pub locale: String,
    /// Where it came from.
    pub source: LocaleSource,
    /// Ordered locales to try for translations.
    pub fallbacks: Vec<String>,
}

/// Supported locales and the site default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSettings {
    supported: Vec<String>,
    default: String,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self::new(["tr", "en", "de"], "tr")
    }
}

impl LocaleSettings {
    /// Creates settings from raw codes. The default is always supported.
    pub fn new<I, S>(supported: I, default: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let default = normalize(default).unwrap_or_else(|| "tr".to_string());
        let mut codes: Vec<String> = Vec::new();
        for code in supported.into_iter().filter_map(|c| normalize(c.as_ref())) {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        if !codes.contains(&default) {
            codes.insert(0, default.clone());
        }

        Self {
            supported: codes,
            default,
        }
    }

    /// Supported locale codes.
    #[must_use]
    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    /// Site default locale.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default
    }

    /// Normalizes `raw` and returns it if supported.
    #[must_use]
    pub fn pick(&self, raw: &str) -> Option<String> {
        normalize(raw).filter(|code| self.supported.contains(code))
    }

    /// Resolves the locale: `X-Locale`, cookie, `Accept-Language`, default.
    #[must_use]
    pub fn resolve(&self, hints: LocaleHints<'_>) -> ResolvedLocale {
        let (locale, source) = hints
            .x_locale
            .and_then(|raw| self.pick(raw))
            .map(|l| (l, LocaleSource::Header))
            .or_else(|| {
                hints
                    .cookie
                    .and_then(|raw| self.pick(raw))
                    .map(|l| (l, LocaleSource::Cookie))
            })
            .or_else(|| {
                hints
                    .accept_language
                    .and_then(|raw| self.pick_accept_language(raw))
                    .map(|l| (l, LocaleSource::AcceptLanguage))
            })
            .unwrap_or_else(|| (self.default.clone(), LocaleSource::Default));

        let fallbacks = self.fallback_chain(&locale);
        ResolvedLocale {
            locale,
            source,
            fallbacks,
        }
    }

    /// Picks the best supported entry of an `Accept-Language` header.
    #[must_use]
    pub fn pick_accept_language(&self, header: &str) -> Option<String> {
        parse_accept_language(header)
            .into_iter()
            .find_map(|(tag, _)| self.pick(&tag))
    }

    /// Ordered locales to try: the requested one, then the default.
    #[must_use]
    pub fn fallback_chain(&self, locale: &str) -> Vec<String> {
        let mut chain = Vec::with_capacity(2);
        if let Some(code) = self.pick(locale) {
            chain.push(code);
        }
        if !chain.contains(&self.default) {
            chain.push(self.default.clone());
        }
        chain
    }
}

/// Normalizes a language tag to its lowercase primary subtag.
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    let tag = raw.trim().replace('_', "-").to_ascii_lowercase();
    let primary = tag.split('-').next().unwrap_or_default();
    if primary.is_empty() || primary == "*" || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(primary.to_string())
}

/// Parses an `Accept-Language` header into `(tag, q)` pairs, best first.
///
/// Entries with `q=0` or an unparseable weight are dropped; ties keep their
/// header order.
#[must_use]
pub fn parse_accept_language(header: &str) -> Vec<(String, f32)> {
    let mut entries: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() {
                return None;
            }
            let mut q = 1.0_f32;
            for param in pieces {
                if let Some(value) = param.trim().strip_prefix("q=") {
                    q = value.trim().parse().ok()?;
                }
            }
            (q > 0.0).then(|| (tag.to_string(), q))
        })
        .collect();

    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn tr_en() -> LocaleSettings {
        LocaleSettings::new(["tr", "en"], "tr")
    }

    #[test]
    fn unsupported_header_falls_through_to_accept_language() {
        let resolved = tr_en().resolve(LocaleHints {
            x_locale: Some("de"),
            cookie: None,
            accept_language: Some("en-US,en;q=0.9"),
        });

        assert_eq!(resolved.locale, "en");
        assert_eq!(resolved.source, LocaleSource::AcceptLanguage);
        assert_eq!(resolved.fallbacks, vec!["en", "tr"]);
    }

    #[test]
    fn unsupported_everything_falls_back_to_default() {
        let resolved = tr_en().resolve(LocaleHints {
            x_locale: Some("de"),
            cookie: None,
            accept_language: Some("fr-FR,de;q=0.8"),
        });

        assert_eq!(resolved.locale, "tr");
        assert_eq!(resolved.source, LocaleSource::Default);
        assert_eq!(resolved.fallbacks, vec!["tr"]);
    }

    #[test]
    fn header_wins_over_cookie_and_accept_language() {
        let resolved = tr_en().resolve(LocaleHints {
            x_locale: Some("EN"),
            cookie: Some("tr"),
            accept_language: Some("tr"),
        });

        assert_eq!(resolved.locale, "en");
        assert_eq!(resolved.source, LocaleSource::Header);
    }

    #[test]
    fn cookie_is_used_before_accept_language() {
        let resolved = tr_en().resolve(LocaleHints {
            x_locale: None,
            cookie: Some("en"),
            accept_language: Some("tr"),
        });

        assert_eq!(resolved.locale, "en");
        assert_eq!(resolved.source, LocaleSource::Cookie);
    }

    #[test]
    fn no_hints_yield_default() {
        let resolved = tr_en().resolve(LocaleHints::default());
        assert_eq!(resolved.locale, "tr");
        assert_eq!(resolved.source, LocaleSource::Default);
    }

    #[test]
    fn accept_language_respects_weights() {
        let settings = LocaleSettings::new(["tr", "en", "de"], "tr");
        assert_eq!(
            settings.pick_accept_language("tr;q=0.3, de;q=0.9, en;q=0.5"),
            Some("de".to_string())
        );
    }

    #[test]
    fn accept_language_skips_zero_weight_and_wildcard() {
        assert_eq!(
            tr_en().pick_accept_language("en;q=0, *;q=0.5"),
            None
        );
    }

    #[test]
    fn parse_accept_language_orders_by_weight_stably() {
        let parsed = parse_accept_language("fr;q=0.5, en, de, it;q=bogus");
        let tags: Vec<&str> = parsed.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(tags, vec!["en", "de", "fr"]);
    }

    #[rstest]
    #[case("en-US", Some("en"))]
    #[case(" TR ", Some("tr"))]
    #[case("de_AT", Some("de"))]
    #[case("*", None)]
    #[case("", None)]
    #[case("e1", None)]
    fn normalizes_tags(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize(raw).as_deref(), expected);
    }

    #[test]
    fn default_is_always_supported() {
        let settings = LocaleSettings::new(["en"], "tr");
        assert_eq!(settings.supported(), ["tr".to_string(), "en".to_string()]);
        assert_eq!(settings.default_locale(), "tr");
    }
}
