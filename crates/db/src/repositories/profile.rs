//! Profile repository. A profile shares its ID with the owning user.

use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use super::error::RepoResult;
use crate::{entities::profiles, now};

/// Changes to a profile. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    /// Display name.
    pub full_name: Option<Option<String>>,
    /// Phone number.
    pub phone: Option<Option<String>>,
    /// Avatar URL.
    pub avatar_url: Option<Option<String>>,
    /// Street address.
    pub address: Option<Option<String>>,
    /// City.
    pub city: Option<Option<String>>,
    /// Country.
    pub country: Option<Option<String>>,
}

/// Profile repository.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl ProfileRepository {
    /// Creates a new profile repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Returns the user's profile, creating an empty one if missing.
    pub async fn get_or_create(&self, user_id: &str) -> RepoResult<profiles::Model> {
        if let Some(profile) = profiles::Entity::find_by_id(user_id.to_string())
            .one(self.db.as_ref())
            .await?
        {
            return Ok(profile);
        }

        let ts = now();
        let profile = profiles::ActiveModel {
            id: Set(user_id.to_string()),
            full_name: Set(None),
            phone: Set(None),
            avatar_url: Set(None),
            address: Set(None),
            city: Set(None),
            country: Set(None),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(self.db.as_ref())
        .await?;
        tracing::debug!(user_id = %user_id, "Created missing profile");
        Ok(profile)
    }

    /// Applies `input` to the user's profile.
    pub async fn update(
        &self,
        user_id: &str,
        input: UpdateProfileInput,
    ) -> RepoResult<profiles::Model> {
        let existing = self.get_or_create(user_id).await?;
        let mut active: profiles::ActiveModel = existing.into();
        if let Some(full_name) = input.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(phone);
        }
        if let Some(avatar_url) = input.avatar_url {
            active.avatar_url = Set(avatar_url);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if let Some(city) = input.city {
            active.city = Set(city);
        }
        if let Some(country) = input.country {
            active.country = Set(country);
        }
        active.updated_at = Set(now());
        Ok(active.update(self.db.as_ref()).await?)
    }
}
