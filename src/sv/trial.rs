//! Trial lifecycle - trial starts, status derivation, paid conversion.

use serde::Serialize;

use crate::{
  entity::{SubscriptionTier, event, profile},
  notify,
  nudge::Nudge,
  prelude::*,
  state::Config,
  sv,
};

use crate::model::Outcome;

/// Upgrade prompts are shown from this trial day onward.
pub const UPGRADE_PROMPT_DAY: i64 = 30;

/// Snapshot of a user's trial, derived from the stored record and the
/// current instant. Never persisted and never cached; expiry exists only
/// in this view, the stored row is left untouched.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrialStatus {
  pub is_active: bool,
  pub days_remaining: i64,
  pub trial_start_date: Option<DateTime>,
  pub trial_end_date: Option<DateTime>,
  pub nudge_type: Nudge,
  pub show_upgrade_prompt: bool,
  pub can_access_premium: bool,
}

impl TrialStatus {
  /// Status of a user who never started a trial.
  pub fn none() -> Self {
    Self {
      is_active: false,
      days_remaining: 0,
      trial_start_date: None,
      trial_end_date: None,
      nudge_type: Nudge::None,
      show_upgrade_prompt: false,
      can_access_premium: false,
    }
  }

  /// Pure derivation from a stored profile and the current instant.
  ///
  /// Day arithmetic is floor over whole days; `days_remaining` is clamped
  /// at zero once the end stamp has passed.
  pub fn derive(profile: &profile::Model, now: DateTime) -> Self {
    let (Some(started), Some(ends)) =
      (profile.trial_started_at, profile.trial_ends_at)
    else {
      return Self::none();
    };

    let days_elapsed = (now - started).num_days();
    let days_remaining = (ends - now).num_days().max(0);
    let expired = now > ends;

    // A converted account keeps premium access after the trial window;
    // a trial-tier account loses it at expiry.
    let can_access_premium = match profile.subscription_tier {
      SubscriptionTier::Premium => true,
      SubscriptionTier::Trial => !expired,
      SubscriptionTier::Free => false,
    };

    Self {
      is_active: !expired
        && profile.subscription_tier == SubscriptionTier::Trial,
      days_remaining,
      trial_start_date: Some(started),
      trial_end_date: Some(ends),
      nudge_type: Nudge::for_elapsed(days_elapsed, expired),
      show_upgrade_prompt: days_elapsed >= UPGRADE_PROMPT_DAY,
      can_access_premium,
    }
  }
}

pub struct Trial<'a> {
  db: &'a DatabaseConnection,
  config: &'a Config,
}

impl<'a> Trial<'a> {
  pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
    Self { db, config }
  }

  /// Start a free trial. No credit card, non-renewable: the presence of
  /// `trial_started_at` blocks a second start forever, regardless of the
  /// current tier.
  pub async fn start(
    &self,
    user_id: &str,
    email: Option<&str>,
  ) -> Result<Outcome> {
    let profile =
      sv::Profile::new(self.db).get_or_create(user_id, email).await?;

    if profile.trial_started_at.is_some() {
      return Ok(Outcome::invalid(Error::TrialAlreadyUsed));
    }

    if profile.subscription_tier == SubscriptionTier::Premium {
      return Ok(Outcome::invalid(Error::AlreadySubscribed));
    }

    let now = Utc::now().naive_utc();
    let ends_at = now + TimeDelta::days(self.config.trial_days);

    profile::ActiveModel {
      subscription_tier: Set(SubscriptionTier::Trial),
      trial_started_at: Set(Some(now)),
      trial_ends_at: Set(Some(ends_at)),
      email_verified: Set(false),
      ..profile.into()
    }
    .update(self.db)
    .await?;

    self
      .log_event(
        user_id,
        "trial_started",
        json::json!({
          "duration_days": self.config.trial_days,
          "email": email,
        }),
      )
      .await;

    if let Some(email) = email
      && let Err(err) = notify::send(email, notify::Template::TrialWelcome).await
    {
      warn!("failed to send welcome email to {email}: {err}");
    }

    Ok(Outcome::ok(format!(
      "Welcome! Your {}-day free trial has started. No credit card \
       required. Explore all premium features until {}.",
      self.config.trial_days,
      ends_at.format("%d.%m.%Y"),
    )))
  }

  /// Current trial status. Read-only: expiry never mutates the record and
  /// never flips the stored tier.
  pub async fn status(&self, user_id: &str) -> Result<TrialStatus> {
    let profile = profile::Entity::find_by_id(user_id).one(self.db).await?;
    let now = Utc::now().naive_utc();

    Ok(match profile {
      Some(profile) => TrialStatus::derive(&profile, now),
      None => TrialStatus::none(),
    })
  }

  /// Convert a trial account to a paid subscription. Re-invocable: a
  /// repeat call simply re-stamps; duplicate billing is the payment
  /// collaborator's problem, not ours.
  pub async fn convert_to_paid(
    &self,
    user_id: &str,
    plan_id: &str,
  ) -> Result<Outcome> {
    let profile = profile::Entity::find_by_id(user_id).one(self.db).await?;

    let Some(profile) = profile else {
      return Ok(Outcome::invalid(Error::NoTrialFound));
    };
    let Some(started) = profile.trial_started_at else {
      return Ok(Outcome::invalid(Error::NoTrialFound));
    };

    let now = Utc::now().naive_utc();
    let days_used = (now - started).num_days();

    profile::ActiveModel {
      subscription_tier: Set(SubscriptionTier::Premium),
      subscription_started_at: Set(Some(now)),
      plan_id: Set(Some(plan_id.to_string())),
      ..profile.into()
    }
    .update(self.db)
    .await?;

    self
      .log_event(
        user_id,
        "trial_converted",
        json::json!({
          "days_used": days_used,
          "plan": plan_id,
        }),
      )
      .await;

    Ok(Outcome::ok(
      "Welcome to Premium! You now have unlimited access to all features.",
    ))
  }

  /// Best-effort analytics log. A failed write must not fail the
  /// lifecycle mutation it accompanies.
  async fn log_event(&self, user_id: &str, name: &str, meta: json::Value) {
    let now = Utc::now().naive_utc();
    let event = event::ActiveModel {
      user_id: Set(user_id.to_string()),
      event: Set(name.to_string()),
      meta: Set(Some(meta)),
      created_at: Set(now),
      ..Default::default()
    };

    if let Err(err) = event.insert(self.db).await {
      warn!("failed to log trial event '{name}' for {user_id}: {err}");
    }
  }
}

#[cfg(test)]
mod tests {
  use sea_orm::{ConnectionTrait, Database, DbBackend, Schema};

  use super::*;
  use crate::entity::*;

  async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);

    let stmt = schema.create_table_from_entity(profile::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    let stmt = schema.create_table_from_entity(download::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    let stmt = schema.create_table_from_entity(session::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    let stmt = schema.create_table_from_entity(event::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    db
  }

  fn trial_profile(started: DateTime) -> profile::Model {
    profile::Model {
      user_id: "u1".into(),
      email: None,
      subscription_tier: SubscriptionTier::Trial,
      trial_started_at: Some(started),
      trial_ends_at: Some(started + TimeDelta::days(45)),
      subscription_started_at: None,
      plan_id: None,
      email_verified: false,
      phone_verified: false,
      created_at: started,
    }
  }

  #[tokio::test]
  async fn test_start_trial_stamps_45_days() {
    let db = setup_test_db().await;
    let config = Config::default();

    let outcome =
      Trial::new(&db, &config).start("u1", Some("owner@example.com")).await.unwrap();
    assert!(outcome.success);

    let profile =
      profile::Entity::find_by_id("u1").one(&db).await.unwrap().unwrap();
    assert_eq!(profile.subscription_tier, SubscriptionTier::Trial);

    let started = profile.trial_started_at.unwrap();
    let ends = profile.trial_ends_at.unwrap();
    assert_eq!(ends - started, TimeDelta::days(45));
  }

  #[tokio::test]
  async fn test_start_trial_twice_rejected() {
    let db = setup_test_db().await;
    let config = Config::default();
    let sv = Trial::new(&db, &config);

    assert!(sv.start("u1", None).await.unwrap().success);

    let before =
      profile::Entity::find_by_id("u1").one(&db).await.unwrap().unwrap();

    let second = sv.start("u1", None).await.unwrap();
    assert!(!second.success);
    assert!(second.message.contains("already used"));

    let after =
      profile::Entity::find_by_id("u1").one(&db).await.unwrap().unwrap();
    assert_eq!(after.trial_started_at, before.trial_started_at);
    assert_eq!(after.trial_ends_at, before.trial_ends_at);
  }

  #[tokio::test]
  async fn test_start_trial_rejected_for_subscribers() {
    let db = setup_test_db().await;
    let config = Config::default();

    let now = Utc::now().naive_utc();
    profile::ActiveModel {
      user_id: Set("u1".into()),
      email: Set(None),
      subscription_tier: Set(SubscriptionTier::Premium),
      trial_started_at: Set(None),
      trial_ends_at: Set(None),
      subscription_started_at: Set(Some(now)),
      plan_id: Set(Some("annual".into())),
      email_verified: Set(true),
      phone_verified: Set(false),
      created_at: Set(now),
    }
    .insert(&db)
    .await
    .unwrap();

    let outcome = Trial::new(&db, &config).start("u1", None).await.unwrap();
    assert!(!outcome.success);
    assert!(outcome.message.contains("active subscription"));
  }

  #[tokio::test]
  async fn test_status_without_trial() {
    let db = setup_test_db().await;
    let config = Config::default();

    let status = Trial::new(&db, &config).status("nobody").await.unwrap();
    assert_eq!(status, TrialStatus::none());
    assert!(!status.is_active);
    assert!(!status.can_access_premium);
    assert_eq!(status.nudge_type, Nudge::None);
    assert_eq!(status.days_remaining, 0);
  }

  #[test]
  fn test_derive_day_seven_boundary() {
    let started =
      Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap().naive_utc();
    let profile = trial_profile(started);

    // One second short of 7 whole days: still no nudge.
    let now = started + TimeDelta::days(7) - TimeDelta::seconds(1);
    assert_eq!(
      TrialStatus::derive(&profile, now).nudge_type,
      Nudge::None
    );

    let now = started + TimeDelta::days(7);
    assert_eq!(TrialStatus::derive(&profile, now).nudge_type, Nudge::Day7);
  }

  #[test]
  fn test_derive_day_eight_scenario() {
    let started =
      Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap().naive_utc();
    let profile = trial_profile(started);

    let status =
      TrialStatus::derive(&profile, started + TimeDelta::days(8));
    assert_eq!(status.nudge_type, Nudge::Day7);
    assert!(!status.show_upgrade_prompt);
    assert!(status.is_active);
    assert_eq!(status.days_remaining, 37);
  }

  #[test]
  fn test_derive_upgrade_prompt_from_day_30() {
    let started =
      Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap().naive_utc();
    let profile = trial_profile(started);

    let day29 = TrialStatus::derive(&profile, started + TimeDelta::days(29));
    assert!(!day29.show_upgrade_prompt);

    let day30 = TrialStatus::derive(&profile, started + TimeDelta::days(30));
    assert!(day30.show_upgrade_prompt);
  }

  #[test]
  fn test_derive_expired_clamps_days_remaining() {
    let started =
      Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap().naive_utc();
    let profile = trial_profile(started);

    let status =
      TrialStatus::derive(&profile, started + TimeDelta::days(50));
    assert_eq!(status.days_remaining, 0);
    assert_eq!(status.nudge_type, Nudge::Expired);
    assert!(!status.is_active);
    assert!(!status.can_access_premium);
  }

  #[test]
  fn test_derive_is_pure() {
    let started =
      Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap().naive_utc();
    let profile = trial_profile(started);
    let now = started + TimeDelta::days(41);

    assert_eq!(
      TrialStatus::derive(&profile, now),
      TrialStatus::derive(&profile, now)
    );
  }

  #[tokio::test]
  async fn test_convert_without_trial() {
    let db = setup_test_db().await;
    let config = Config::default();

    let outcome =
      Trial::new(&db, &config).convert_to_paid("u1", "annual").await.unwrap();
    assert!(!outcome.success);
    assert!(outcome.message.contains("No trial found"));
  }

  #[tokio::test]
  async fn test_convert_keeps_access_after_expiry() {
    let db = setup_test_db().await;
    let config = Config::default();
    let sv = Trial::new(&db, &config);

    assert!(sv.start("u1", None).await.unwrap().success);

    // Age the trial past its end stamp.
    let profile =
      profile::Entity::find_by_id("u1").one(&db).await.unwrap().unwrap();
    let past = Utc::now().naive_utc() - TimeDelta::days(1);
    profile::ActiveModel {
      trial_started_at: Set(Some(past - TimeDelta::days(45))),
      trial_ends_at: Set(Some(past)),
      ..profile.into()
    }
    .update(&db)
    .await
    .unwrap();

    let expired = sv.status("u1").await.unwrap();
    assert!(!expired.can_access_premium);
    assert_eq!(expired.nudge_type, Nudge::Expired);

    let outcome = sv.convert_to_paid("u1", "annual").await.unwrap();
    assert!(outcome.success);

    let status = sv.status("u1").await.unwrap();
    assert!(status.can_access_premium);
    assert!(!status.is_active);

    let profile =
      profile::Entity::find_by_id("u1").one(&db).await.unwrap().unwrap();
    assert_eq!(profile.subscription_tier, SubscriptionTier::Premium);
    assert_eq!(profile.plan_id.as_deref(), Some("annual"));
  }
}
