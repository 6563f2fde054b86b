//! Report entity. A flag raised by one user against a log and its owner.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "report")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The log being reported.
    pub log_id: String,

    /// The user who submitted the report.
    pub reporter_id: String,

    /// The user being reported (the log's owner).
    pub reported_user_id: String,

    /// Reason for the report.
    pub reason: String,

    /// When the report was created.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
