//! `SeaORM` Entity for site_settings table.
//!
//! `locale = "*"` marks a value shared by every locale.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Locale marker for locale-independent settings.
pub const ANY_LOCALE: &str = "*";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub key: String,
    pub locale: String,
    pub value: Json,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
