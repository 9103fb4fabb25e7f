//! Active session entity - a device counts as concurrent while its
//! `last_activity` is within the configured window

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "active_sessions")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub user_id: String,
  #[sea_orm(primary_key, auto_increment = false)]
  pub session_id: String,
  pub last_activity: NaiveDateTime,
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
