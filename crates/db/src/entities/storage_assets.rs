//! `SeaORM` Entity for storage_assets table.
//!
//! Rows describe files held by the external media store.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storage_assets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub bucket: String,
    pub path: String,
    pub folder: Option<String>,
    pub mime: String,
    pub size: i64,
    pub url: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub metadata: Option<Json>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
