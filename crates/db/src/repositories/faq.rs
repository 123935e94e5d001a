//! FAQ repository.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use toronto_core::query::ListQuery;

use super::{
    error::{RepoResult, RepositoryError},
    listing::{ListSpec, apply_list_query},
    translation::{Localized, localize, pick_translation},
};
use crate::{
    entities::{faqs, faqs_i18n},
    new_id, now,
};

/// A FAQ entry with its picked translation.
pub type LocalizedFaq = Localized<faqs::Model, faqs_i18n::Model>;

/// One locale's question and answer.
#[derive(Debug, Clone)]
pub struct FaqTranslationInput {
    /// Locale code.
    pub locale: String,
    /// Question text.
    pub question: String,
    /// Answer text.
    pub answer: String,
}

/// Input for creating a FAQ entry.
#[derive(Debug, Clone)]
pub struct CreateFaqInput {
    /// Grouping label.
    pub category: Option<String>,
    /// Publicly visible.
    pub is_active: bool,
    /// Sort position.
    pub display_order: i32,
    /// Per-locale copy.
    pub translations: Vec<FaqTranslationInput>,
}

/// Input for updating a FAQ entry.
#[derive(Debug, Clone, Default)]
pub struct UpdateFaqInput {
    /// Grouping label.
    pub category: Option<Option<String>>,
    /// Publicly visible.
    pub is_active: Option<bool>,
    /// Sort position.
    pub display_order: Option<i32>,
    /// Translations upserted by locale.
    pub translations: Vec<FaqTranslationInput>,
}

/// A FAQ entry with every translation.
#[derive(Debug, Clone)]
pub struct FaqWithTranslations {
    /// The base row.
    pub faq: faqs::Model,
    /// All locale rows.
    pub translations: Vec<faqs_i18n::Model>,
}

impl ListSpec for faqs::Entity {
    fn exposed_columns() -> Vec<Self::Column> {
        vec![
            faqs::Column::Id,
            faqs::Column::Category,
            faqs::Column::IsActive,
            faqs::Column::DisplayOrder,
            faqs::Column::CreatedAt,
            faqs::Column::UpdatedAt,
        ]
    }

    fn default_order() -> Vec<(Self::Column, Order)> {
        vec![
            (faqs::Column::DisplayOrder, Order::Asc),
            (faqs::Column::CreatedAt, Order::Desc),
        ]
    }
}

/// FAQ repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct FaqRepository {
    db: Arc<DatabaseConnection>,
}

impl FaqRepository {
    /// Creates a new FAQ repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists FAQ entries matching `query`, localized along `chain`.
    pub async fn list_localized(
        &self,
        query: &ListQuery,
        chain: &[String],
        active_only: bool,
    ) -> RepoResult<Vec<LocalizedFaq>> {
        let mut select = faqs::Entity::find();
        if active_only {
            select = select.filter(faqs::Column::IsActive.eq(true));
        }
        let items = apply_list_query(select, query).all(self.db.as_ref()).await?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let rows = faqs_i18n::Entity::find()
            .filter(faqs_i18n::Column::FaqId.is_in(items.iter().map(|f| f.id.clone())))
            .all(self.db.as_ref())
            .await?;
        Ok(localize(items, &rows, chain, |f| &f.id))
    }

    /// Finds one FAQ entry by ID, localized along `chain`.
    pub async fn find_localized(
        &self,
        id: &str,
        chain: &[String],
        active_only: bool,
    ) -> RepoResult<LocalizedFaq> {
        let mut select = faqs::Entity::find_by_id(id.to_string());
        if active_only {
            select = select.filter(faqs::Column::IsActive.eq(true));
        }
        let faq = select
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("FAQ"))?;
        let rows = load_translations(self.db.as_ref(), &faq.id).await?;
        let translation = pick_translation(&rows, &faq.id, chain).cloned();
        Ok(Localized {
            item: faq,
            translation,
        })
    }

    /// Loads a FAQ entry with all of its translations.
    pub async fn get_with_translations(&self, id: &str) -> RepoResult<FaqWithTranslations> {
        let faq = faqs::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("FAQ"))?;
        let translations = load_translations(self.db.as_ref(), &faq.id).await?;
        Ok(FaqWithTranslations { faq, translations })
    }

    /// Creates a FAQ entry and its translations in one transaction.
    pub async fn create(&self, input: CreateFaqInput) -> RepoResult<FaqWithTranslations> {
        let ts = now();
        let id = new_id();
        let txn = self.db.begin().await?;

        let faq = faqs::ActiveModel {
            id: Set(id.clone()),
            category: Set(input.category),
            is_active: Set(input.is_active),
            display_order: Set(input.display_order),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(&txn)
        .await?;

        for translation in input.translations {
            upsert_translation(&txn, &id, translation).await?;
        }
        let translations = load_translations(&txn, &id).await?;
        txn.commit().await?;

        tracing::info!(faq_id = %id, "FAQ created");
        Ok(FaqWithTranslations { faq, translations })
    }

    /// Updates a FAQ entry and upserts the given translations.
    pub async fn update(&self, id: &str, input: UpdateFaqInput) -> RepoResult<FaqWithTranslations> {
        let existing = faqs::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("FAQ"))?;

        let txn = self.db.begin().await?;
        let mut active: faqs::ActiveModel = existing.into();
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(display_order) = input.display_order {
            active.display_order = Set(display_order);
        }
        active.updated_at = Set(now());
        let faq = active.update(&txn).await?;

        for translation in input.translations {
            upsert_translation(&txn, id, translation).await?;
        }
        let translations = load_translations(&txn, id).await?;
        txn.commit().await?;

        tracing::info!(faq_id = %id, "FAQ updated");
        Ok(FaqWithTranslations { faq, translations })
    }

    /// Deletes a FAQ entry; translations cascade.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = faqs::Entity::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("FAQ"));
        }
        tracing::info!(faq_id = %id, "FAQ deleted");
        Ok(())
    }
}

async fn load_translations<C: ConnectionTrait>(
    db: &C,
    faq_id: &str,
) -> RepoResult<Vec<faqs_i18n::Model>> {
    Ok(faqs_i18n::Entity::find()
        .filter(faqs_i18n::Column::FaqId.eq(faq_id))
        .order_by_asc(faqs_i18n::Column::Locale)
        .all(db)
        .await?)
}

async fn upsert_translation<C: ConnectionTrait>(
    db: &C,
    faq_id: &str,
    input: FaqTranslationInput,
) -> RepoResult<()> {
    let existing = faqs_i18n::Entity::find()
        .filter(faqs_i18n::Column::FaqId.eq(faq_id))
        .filter(faqs_i18n::Column::Locale.eq(&input.locale))
        .one(db)
        .await?;
    let ts = now();

    match existing {
        Some(row) => {
            let mut active: faqs_i18n::ActiveModel = row.into();
            active.question = Set(input.question);
            active.answer = Set(input.answer);
            active.updated_at = Set(ts);
            active.update(db).await?;
        }
        None => {
            faqs_i18n::ActiveModel {
                id: Set(new_id()),
                faq_id: Set(faq_id.to_string()),
                locale: Set(input.locale),
                question: Set(input.question),
                answer: Set(input.answer),
                created_at: Set(ts),
                updated_at: Set(ts),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}
