//! Trial event entity - best-effort analytics log of lifecycle transitions

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trial_events")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub user_id: String,
  pub event: String,
  /// json event metadata
  pub meta: Option<Json>,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::profile::Entity",
    from = "Column::UserId",
    to = "super::profile::Column::UserId"
  )]
  Profile,
}

impl Related<super::profile::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Profile.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
