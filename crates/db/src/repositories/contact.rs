//! Contact message repository.

use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Order, Set};
use toronto_core::query::ListQuery;

use super::{
    error::{RepoResult, RepositoryError},
    listing::{ListSpec, apply_list_query},
};
use crate::{entities::contact_messages, new_id, now};

/// Status a fresh message starts in.
pub const STATUS_NEW: &str = "new";

/// Every status an admin may set.
pub const STATUSES: [&str; 4] = [STATUS_NEW, "in_progress", "replied", "closed"];

/// A message submitted through the public contact form.
#[derive(Debug, Clone)]
pub struct CreateContactInput {
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Sender phone.
    pub phone: Option<String>,
    /// Subject line.
    pub subject: Option<String>,
    /// Message body.
    pub message: String,
    /// Locale the form was shown in.
    pub locale: Option<String>,
    /// Client IP.
    pub ip: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
}

/// Admin-side changes to a message.
#[derive(Debug, Clone, Default)]
pub struct UpdateContactInput {
    /// Workflow status.
    pub status: Option<String>,
    /// Resolved flag.
    pub is_resolved: Option<bool>,
    /// Internal note.
    pub admin_note: Option<Option<String>>,
}

impl ListSpec for contact_messages::Entity {
    fn exposed_columns() -> Vec<Self::Column> {
        vec![
            contact_messages::Column::Id,
            contact_messages::Column::Name,
            contact_messages::Column::Email,
            contact_messages::Column::Subject,
            contact_messages::Column::Locale,
            contact_messages::Column::Status,
            contact_messages::Column::IsResolved,
            contact_messages::Column::CreatedAt,
            contact_messages::Column::UpdatedAt,
        ]
    }

    fn default_order() -> Vec<(Self::Column, Order)> {
        vec![(contact_messages::Column::CreatedAt, Order::Desc)]
    }
}

/// Contact message repository.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    db: Arc<DatabaseConnection>,
}

impl ContactRepository {
    /// Creates a new contact repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists messages matching `query`, newest first by default.
    pub async fn list(&self, query: &ListQuery) -> RepoResult<Vec<contact_messages::Model>> {
        let select = contact_messages::Entity::find();
        Ok(apply_list_query(select, query).all(self.db.as_ref()).await?)
    }

    /// Finds a message by ID.
    pub async fn find_by_id(&self, id: &str) -> RepoResult<contact_messages::Model> {
        contact_messages::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("Contact message"))
    }

    /// Stores a new message with status `new`.
    pub async fn create(&self, input: CreateContactInput) -> RepoResult<contact_messages::Model> {
        let ts = now();
        let message = contact_messages::ActiveModel {
            id: Set(new_id()),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            subject: Set(input.subject),
            message: Set(input.message),
            locale: Set(input.locale),
            status: Set(STATUS_NEW.to_string()),
            is_resolved: Set(false),
            admin_note: Set(None),
            ip: Set(input.ip),
            user_agent: Set(input.user_agent),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(self.db.as_ref())
        .await?;

        tracing::info!(contact_id = %message.id, "Contact message received");
        Ok(message)
    }

    /// Updates workflow fields of a message.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateContactInput,
    ) -> RepoResult<contact_messages::Model> {
        let existing = self.find_by_id(id).await?;
        let mut active: contact_messages::ActiveModel = existing.into();
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(is_resolved) = input.is_resolved {
            active.is_resolved = Set(is_resolved);
        }
        if let Some(admin_note) = input.admin_note {
            active.admin_note = Set(admin_note);
        }
        active.updated_at = Set(now());
        Ok(active.update(self.db.as_ref()).await?)
    }

    /// Deletes a message.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = contact_messages::Entity::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("Contact message"));
        }
        tracing::info!(contact_id = %id, "Contact message deleted");
        Ok(())
    }
}
