//! Profile entity - one row per user, owns the trial timestamps

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Subscription tier enum
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
  #[sea_orm(string_value = "free")]
  Free,
  #[sea_orm(string_value = "trial")]
  Trial,
  #[sea_orm(string_value = "premium")]
  Premium,
}

impl Default for SubscriptionTier {
  fn default() -> Self {
    Self::Free
  }
}

/// `trial_started_at` and `trial_ends_at` are stamped together exactly once,
/// by a successful trial start, and never change afterwards. Expiry is a
/// view computed at read time; it does not touch this row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub user_id: String,
  pub email: Option<String>,
  pub subscription_tier: SubscriptionTier,
  pub trial_started_at: Option<NaiveDateTime>,
  pub trial_ends_at: Option<NaiveDateTime>,
  pub subscription_started_at: Option<NaiveDateTime>,
  pub plan_id: Option<String>,
  pub email_verified: bool,
  pub phone_verified: bool,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::download::Entity")]
  Downloads,
  #[sea_orm(has_many = "super::session::Entity")]
  Sessions,
  #[sea_orm(has_many = "super::event::Entity")]
  Events,
}

impl Related<super::download::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Downloads.def()
  }
}

impl Related<super::session::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Sessions.def()
  }
}

impl Related<super::event::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Events.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
