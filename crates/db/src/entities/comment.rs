//! Comment entity. Attached to either a log or a post.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The commenting user.
    pub user_id: String,

    /// Set when the comment targets a log.
    #[sea_orm(nullable)]
    pub log_id: Option<String>,

    /// Set when the comment targets a post.
    #[sea_orm(nullable)]
    pub post_id: Option<String>,

    pub body: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
