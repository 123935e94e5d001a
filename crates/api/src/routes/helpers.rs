//! Checks shared by the content route modules.

use serde_json::json;
use toronto_core::slug::{is_valid_slug, slugify};
use toronto_shared::AppError;

use crate::{AppState, error::ApiError};

/// Serde default for `is_active`-style flags.
pub(crate) const fn default_true() -> bool {
    true
}

/// 422 for a single field, shaped like `validator`'s error details.
pub(crate) fn field_error(field: &str, code: &str, message: &str) -> ApiError {
    ApiError(AppError::Validation {
        message: "Request validation failed".to_string(),
        details: Some(json!({
            (field): [{ "code": code, "message": message, "params": {} }]
        })),
    })
}

/// Normalizes a translation locale and requires it to be supported.
pub(crate) fn supported_locale(state: &AppState, raw: &str) -> Result<String, ApiError> {
    state.locales.pick(raw).ok_or_else(|| {
        field_error(
            "locale",
            "unsupported_locale",
            &format!(
                "Locale '{raw}' is not one of: {}",
                state.locales.supported().join(", ")
            ),
        )
    })
}

/// Validates an explicit slug.
pub(crate) fn check_slug(slug: &str) -> Result<(), ApiError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(field_error(
            "slug",
            "invalid_slug",
            "Slug may only contain lowercase letters, digits and single dashes",
        ))
    }
}

/// Uses the explicit slug, or derives one from `title`.
pub(crate) fn slug_or_derive(explicit: Option<String>, title: Option<&str>) -> Result<String, ApiError> {
    let slug = match explicit.filter(|s| !s.trim().is_empty()) {
        Some(slug) => slug.trim().to_string(),
        None => title.map(slugify).unwrap_or_default(),
    };
    check_slug(&slug)?;
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_slug_from_title() {
        let slug = slug_or_derive(None, Some("Villa Çamlık 2024")).unwrap();
        assert_eq!(slug, "villa-camlik-2024");
    }

    #[test]
    fn explicit_slug_wins_and_is_checked() {
        assert_eq!(
            slug_or_derive(Some("office-tower".into()), Some("Ignored")).unwrap(),
            "office-tower"
        );
        let err = slug_or_derive(Some("Not A Slug".into()), None).unwrap_err();
        assert_eq!(err.0.status_code(), 422);
    }

    #[test]
    fn missing_slug_and_title_is_rejected() {
        let err = slug_or_derive(Some("  ".into()), None).unwrap_err();
        assert_eq!(err.0.error_code(), "validation_error");
    }
}
