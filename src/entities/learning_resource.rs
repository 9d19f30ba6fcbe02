use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::user::StringList;

#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "learning_resource")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub topic: String,
    pub skill_level: String,
    pub resource_type: String,
    pub url: String,
    pub tags: StringList,
    /// View counter, doubles as the popularity signal.
    pub views: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
