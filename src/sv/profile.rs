use crate::{
  entity::{SubscriptionTier, profile},
  prelude::*,
};

pub struct Profile<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Profile<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn get_or_create(
    &self,
    user_id: &str,
    email: Option<&str>,
  ) -> Result<profile::Model> {
    if let Some(profile) =
      profile::Entity::find_by_id(user_id).one(self.db).await?
    {
      return Ok(profile);
    }

    let now = Utc::now().naive_utc();
    let profile = profile::ActiveModel {
      user_id: Set(user_id.to_string()),
      email: Set(email.map(str::to_string)),
      subscription_tier: Set(SubscriptionTier::Free),
      trial_started_at: Set(None),
      trial_ends_at: Set(None),
      subscription_started_at: Set(None),
      plan_id: Set(None),
      email_verified: Set(false),
      phone_verified: Set(false),
      created_at: Set(now),
    };

    Ok(profile.insert(self.db).await?)
  }

  pub async fn set_email_verified(
    &self,
    user_id: &str,
    verified: bool,
  ) -> Result<()> {
    let profile = profile::Entity::find_by_id(user_id)
      .one(self.db)
      .await?
      .ok_or(Error::UserNotFound)?;

    profile::ActiveModel { email_verified: Set(verified), ..profile.into() }
      .update(self.db)
      .await?;

    Ok(())
  }

  pub async fn set_phone_verified(
    &self,
    user_id: &str,
    verified: bool,
  ) -> Result<()> {
    let profile = profile::Entity::find_by_id(user_id)
      .one(self.db)
      .await?
      .ok_or(Error::UserNotFound)?;

    profile::ActiveModel { phone_verified: Set(verified), ..profile.into() }
      .update(self.db)
      .await?;

    Ok(())
  }
}
