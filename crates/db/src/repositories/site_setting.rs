//! Site settings repository.
//!
//! A setting is a JSON value keyed by `(key, locale)`. Rows with locale
//! [`ANY_LOCALE`] apply to every locale and lose to a locale-specific row.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, Set,
};
use toronto_core::query::ListQuery;

use super::{
    error::{RepoResult, RepositoryError},
    listing::{ListSpec, apply_list_query, filter_and_order},
};
use crate::{
    entities::site_settings::{self, ANY_LOCALE},
    new_id, now,
};

/// Input for creating a setting.
#[derive(Debug, Clone)]
pub struct CreateSiteSettingInput {
    /// Setting key.
    pub key: String,
    /// Locale code or `*`.
    pub locale: String,
    /// JSON value.
    pub value: serde_json::Value,
}

/// Input for updating a setting.
#[derive(Debug, Clone, Default)]
pub struct UpdateSiteSettingInput {
    /// Setting key.
    pub key: Option<String>,
    /// Locale code or `*`.
    pub locale: Option<String>,
    /// JSON value.
    pub value: Option<serde_json::Value>,
}

impl ListSpec for site_settings::Entity {
    fn exposed_columns() -> Vec<Self::Column> {
        vec![
            site_settings::Column::Id,
            site_settings::Column::Key,
            site_settings::Column::Locale,
            site_settings::Column::CreatedAt,
            site_settings::Column::UpdatedAt,
        ]
    }

    fn default_order() -> Vec<(Self::Column, Order)> {
        vec![
            (site_settings::Column::Key, Order::Asc),
            (site_settings::Column::Locale, Order::Asc),
        ]
    }
}

/// Keeps one row per key: the first locale in `chain` that has the key,
/// else its [`ANY_LOCALE`] row. Key order follows first appearance.
#[must_use]
pub fn resolve_settings(
    rows: Vec<site_settings::Model>,
    chain: &[String],
) -> Vec<site_settings::Model> {
    let rank = |locale: &str| {
        chain
            .iter()
            .position(|c| c == locale)
            .unwrap_or(chain.len())
    };

    let mut resolved: Vec<site_settings::Model> = Vec::new();
    for row in rows {
        if row.locale != ANY_LOCALE && !chain.contains(&row.locale) {
            continue;
        }
        match resolved.iter_mut().find(|r| r.key == row.key) {
            Some(current) if rank(&row.locale) < rank(&current.locale) => *current = row,
            Some(_) => {}
            None => resolved.push(row),
        }
    }
    resolved
}

/// Site settings repository.
#[derive(Debug, Clone)]
pub struct SiteSettingRepository {
    db: Arc<DatabaseConnection>,
}

impl SiteSettingRepository {
    /// Creates a new site settings repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists raw rows matching `query` (admin view).
    pub async fn list(&self, query: &ListQuery) -> RepoResult<Vec<site_settings::Model>> {
        let select = site_settings::Entity::find();
        Ok(apply_list_query(select, query).all(self.db.as_ref()).await?)
    }

    /// Lists settings resolved for the request locale chain.
    ///
    /// `limit`/`offset` count resolved keys, not raw rows, so a page never
    /// splits a key from its locale override.
    pub async fn list_resolved(
        &self,
        query: &ListQuery,
        chain: &[String],
    ) -> RepoResult<Vec<site_settings::Model>> {
        let select = site_settings::Entity::find()
            .filter(site_settings::Column::Locale.is_in(locales_with_any(chain)));
        let rows = filter_and_order(select, query).all(self.db.as_ref()).await?;

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(resolve_settings(rows, chain)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    /// Gets one setting by key, resolved for the request locale chain.
    pub async fn get_resolved(
        &self,
        key: &str,
        chain: &[String],
    ) -> RepoResult<site_settings::Model> {
        let rows = site_settings::Entity::find()
            .filter(site_settings::Column::Key.eq(key))
            .filter(site_settings::Column::Locale.is_in(locales_with_any(chain)))
            .all(self.db.as_ref())
            .await?;
        resolve_settings(rows, chain)
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound("Site setting"))
    }

    /// Finds a setting row by ID.
    pub async fn find_by_id(&self, id: &str) -> RepoResult<site_settings::Model> {
        site_settings::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("Site setting"))
    }

    /// Checks if `(key, locale)` is taken by a row other than `except_id`.
    pub async fn exists(&self, key: &str, locale: &str, except_id: Option<&str>) -> RepoResult<bool> {
        let mut select = site_settings::Entity::find()
            .filter(site_settings::Column::Key.eq(key))
            .filter(site_settings::Column::Locale.eq(locale));
        if let Some(id) = except_id {
            select = select.filter(site_settings::Column::Id.ne(id));
        }
        Ok(select.one(self.db.as_ref()).await?.is_some())
    }

    /// Creates a setting.
    pub async fn create(&self, input: CreateSiteSettingInput) -> RepoResult<site_settings::Model> {
        if self.exists(&input.key, &input.locale, None).await? {
            return Err(duplicate(&input.key, &input.locale));
        }

        let ts = now();
        let setting = site_settings::ActiveModel {
            id: Set(new_id()),
            key: Set(input.key),
            locale: Set(input.locale),
            value: Set(input.value),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(self.db.as_ref())
        .await?;

        tracing::info!(key = %setting.key, locale = %setting.locale, "Site setting created");
        Ok(setting)
    }

    /// Updates a setting.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateSiteSettingInput,
    ) -> RepoResult<site_settings::Model> {
        let existing = self.find_by_id(id).await?;

        let key = input.key.clone().unwrap_or_else(|| existing.key.clone());
        let locale = input.locale.clone().unwrap_or_else(|| existing.locale.clone());
        if (key != existing.key || locale != existing.locale)
            && self.exists(&key, &locale, Some(id)).await?
        {
            return Err(duplicate(&key, &locale));
        }

        let mut active: site_settings::ActiveModel = existing.into();
        if let Some(key) = input.key {
            active.key = Set(key);
        }
        if let Some(locale) = input.locale {
            active.locale = Set(locale);
        }
        if let Some(value) = input.value {
            active.value = Set(value);
        }
        active.updated_at = Set(now());
        let setting = active.update(self.db.as_ref()).await?;

        tracing::info!(key = %setting.key, locale = %setting.locale, "Site setting updated");
        Ok(setting)
    }

    /// Deletes a setting row.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = site_settings::Entity::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("Site setting"));
        }
        Ok(())
    }
}

fn locales_with_any(chain: &[String]) -> Vec<String> {
    chain
        .iter()
        .cloned()
        .chain(std::iter::once(ANY_LOCALE.to_string()))
        .collect()
}

fn duplicate(key: &str, locale: &str) -> RepositoryError {
    RepositoryError::Conflict(format!(
        "Site setting '{key}' already exists for locale '{locale}'"
    ))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    use super::*;

    fn row(key: &str, locale: &str, value: serde_json::Value) -> site_settings::Model {
        site_settings::Model {
            id: format!("{key}-{locale}"),
            key: key.to_string(),
            locale: locale.to_string(),
            value,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn chain() -> Vec<String> {
        vec!["en".to_string(), "tr".to_string()]
    }

    #[test]
    fn locale_row_beats_shared_row() {
        let rows = vec![
            row("site_title", "*", json!("Toronto")),
            row("site_title", "tr", json!("Toronto TR")),
            row("site_title", "en", json!("Toronto EN")),
        ];

        let resolved = resolve_settings(rows, &chain());
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].value, json!("Toronto EN"));
    }

    #[test]
    fn falls_back_to_default_locale_then_shared() {
        let rows = vec![
            row("phone", "*", json!("+90 212 000 00 00")),
            row("slogan", "tr", json!("Yapı")),
            row("slogan", "*", json!("Build")),
        ];

        let resolved = resolve_settings(rows, &chain());
        let values: Vec<_> = resolved.iter().map(|r| (r.key.as_str(), &r.value)).collect();
        assert_eq!(
            values,
            vec![("phone", &json!("+90 212 000 00 00")), ("slogan", &json!("Yapı"))]
        );
    }

    #[tokio::test]
    async fn paging_counts_resolved_keys() {
        // Raw rows sorted by (key, locale): the shared row precedes its override.
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![
                row("address", "*", json!("Istanbul")),
                row("site_title", "*", json!("Toronto")),
                row("site_title", "en", json!("Toronto EN")),
            ]])
            .into_connection();
        let repo = SiteSettingRepository::new(Arc::new(db));
        let query = ListQuery::parse([("limit", "1"), ("offset", "1")]);

        let page = repo.list_resolved(&query, &chain()).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].key, "site_title");
        assert_eq!(page[0].value, json!("Toronto EN"));
    }

    #[test]
    fn rows_outside_chain_are_dropped() {
        let rows = vec![row("slogan", "de", json!("Bauen"))];
        assert!(resolve_settings(rows, &chain()).is_empty());
    }
}
